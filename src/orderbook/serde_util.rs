//! 订单簿线上格式的宽松反序列化辅助函数
//!
//! 协调者返回的数值字段有时是数字，有时是字符串，有时为null。

/// 接受数字、数字字符串或null；无法解析时退化为默认值而不是报错
pub mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::orderbook::data_structures::{CurrencyCode, OrderSide, DEFAULT_CURRENCY};

    fn value_as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }

    fn value_as_u64(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_f64(deserializer)?.unwrap_or(0.0))
    }

    pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_as_f64))
    }

    pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(value_as_u64))
    }

    pub fn u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_u64(deserializer)?.unwrap_or(0))
    }

    /// 币种代码：null、超出范围或无法解析时取默认币种
    pub fn currency<'de, D>(deserializer: D) -> Result<CurrencyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_u64(deserializer)?
            .and_then(|code| CurrencyCode::try_from(code).ok())
            .unwrap_or(DEFAULT_CURRENCY))
    }

    /// 订单方向接受 0/1 或 "0"/"1"，其他值无法确定方向，仍然报错
    pub fn side<'de, D>(deserializer: D) -> Result<OrderSide, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let code = value_as_u64(&value)
            .and_then(|code| u8::try_from(code).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid order type: {}", value)))?;
        OrderSide::try_from(code).map_err(D::Error::custom)
    }
}
