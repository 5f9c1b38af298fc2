use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::data_structures::CurrencyCode;
use super::serde_util::lenient;

/// 协调者对某个币种给出的限额与参考价格
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Limit {
    #[serde(default)]
    pub code: String,
    /// 1个整币以该币种计价的参考价格
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub min_amount: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub max_amount: f64,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub max_bondless_amount: f64,
}

/// 单个协调者的限额表，按币种id索引（线上格式键为字符串形式的数字）
pub type LimitList = HashMap<CurrencyCode, Limit>;

/// 参考价格查询接口
///
/// 查询不到时返回None，调用方自行退化
pub trait LimitLookup {
    fn reference_price(&self, coordinator: &str, currency: CurrencyCode) -> Option<f64>;
}

/// 所有协调者的限额表
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinatorLimits {
    coordinators: HashMap<String, LimitList>,
}

impl CoordinatorLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coordinator: &str, limits: LimitList) {
        self.coordinators.insert(coordinator.to_string(), limits);
    }

    pub fn get(&self, coordinator: &str) -> Option<&LimitList> {
        self.coordinators.get(coordinator)
    }

    pub fn coordinator_count(&self) -> usize {
        self.coordinators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinators.is_empty()
    }

    /// 币种的显示代码（如 "USD"），取任一协调者给出的非空代码
    pub fn currency_label(&self, currency: CurrencyCode) -> Option<&str> {
        self.coordinators
            .values()
            .filter_map(|limits| limits.get(&currency))
            .map(|limit| limit.code.as_str())
            .find(|code| !code.is_empty())
    }
}

impl LimitLookup for CoordinatorLimits {
    fn reference_price(&self, coordinator: &str, currency: CurrencyCode) -> Option<f64> {
        self.coordinators
            .get(coordinator)
            .and_then(|limits| limits.get(&currency))
            .map(|limit| limit.price)
            .filter(|price| *price > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_limits_from_coordinator_json() {
        let limits: CoordinatorLimits = serde_json::from_value(json!({
            "alpha": {
                "1": {"code": "USD", "price": 60000.0, "min_amount": 20, "max_amount": 5000, "max_bondless_amount": 100},
                "2": {"code": "EUR", "price": "55000"}
            }
        }))
        .unwrap();

        assert_eq!(limits.coordinator_count(), 1);
        assert_eq!(limits.reference_price("alpha", 1), Some(60000.0));
        assert_eq!(limits.reference_price("alpha", 2), Some(55000.0));
        assert_eq!(limits.get("alpha").unwrap()[&1].code, "USD");
        assert_eq!(limits.currency_label(2), Some("EUR"));
        assert_eq!(limits.currency_label(3), None);
    }

    #[test]
    fn test_missing_entries_yield_none() {
        let mut limits = CoordinatorLimits::new();
        let mut list = LimitList::new();
        list.insert(1, Limit { code: "USD".to_string(), price: 0.0, ..Default::default() });
        limits.insert("beta", list);

        assert_eq!(limits.reference_price("gamma", 1), None);
        assert_eq!(limits.reference_price("beta", 9), None);
        // 价格为0视为缺失
        assert_eq!(limits.reference_price("beta", 1), None);
    }
}
