use serde::{Deserialize, Serialize};
use std::fmt;

use super::serde_util::lenient;

/// 币种代码（协调者限额表中的整数id，0表示未设置）
pub type CurrencyCode = u32;

/// 未设置币种时使用的默认币种
pub const DEFAULT_CURRENCY: CurrencyCode = 1;

/// 每个整币对应的最小单位数量
pub const SATS_PER_COIN: f64 = 100_000_000.0;

/// 将未设置的币种(0)强制转换为默认币种
pub fn coerce_currency(code: CurrencyCode) -> CurrencyCode {
    if code == 0 {
        DEFAULT_CURRENCY
    } else {
        code
    }
}

/// 订单方向，线上格式为整数 0=买 1=卖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        }
    }
}

impl TryFrom<u8> for OrderSide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderSide::Buy),
            1 => Ok(OrderSide::Sell),
            other => Err(format!("unknown order type: {}", other)),
        }
    }
}

impl From<OrderSide> for u8 {
    fn from(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => 0,
            OrderSide::Sell => 1,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_currency() -> CurrencyCode {
    DEFAULT_CURRENCY
}

/// 公共订单簿中的一笔挂单
///
/// 外部快照拥有这些数据，本crate只读；数值字段缺失或无法解析时按0处理
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::u64")]
    pub id: u64,
    #[serde(rename = "type", deserialize_with = "lenient::side")]
    pub side: OrderSide,
    #[serde(default = "default_currency", deserialize_with = "lenient::currency")]
    pub currency: CurrencyCode,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub price: f64,
    /// 相对市场参考价的溢价（百分比）
    #[serde(default, deserialize_with = "lenient::f64")]
    pub premium: f64,
    /// 当前可成交量（最小单位）
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub satoshis_now: Option<u64>,
    /// 订单来源协调者
    #[serde(default, rename = "coordinatorShortAlias", alias = "coordinator")]
    pub coordinator: Option<String>,
    /// 上游已给出的归一化价格（归一化阶段会重新计算）
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub base_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub min_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub maker_nick: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u64")]
    pub escrow_duration: Option<u64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub bond_size: Option<f64>,
}

impl Order {
    pub fn new(id: u64, side: OrderSide, price: f64, premium: f64) -> Self {
        Self {
            id,
            side,
            currency: DEFAULT_CURRENCY,
            price,
            premium,
            satoshis_now: None,
            coordinator: None,
            base_amount: None,
            amount: None,
            min_amount: None,
            max_amount: None,
            maker_nick: None,
            payment_method: None,
            escrow_duration: None,
            bond_size: None,
        }
    }

    pub fn with_satoshis(mut self, satoshis: u64) -> Self {
        self.satoshis_now = Some(satoshis);
        self
    }

    pub fn with_coordinator(mut self, coordinator: &str) -> Self {
        self.coordinator = Some(coordinator.to_string());
        self
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    /// 可成交量（整币单位），缺失时为0
    pub fn volume(&self) -> f64 {
        self.satoshis_now.unwrap_or(0) as f64 / SATS_PER_COIN
    }
}

/// 归一化后的订单：原订单副本加上以参考币种表示的价格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedOrder {
    pub order: Order,
    pub base_amount: f64,
}

impl NormalizedOrder {
    pub fn side(&self) -> OrderSide {
        self.order.side
    }

    pub fn premium(&self) -> f64 {
        self.order.premium
    }

    pub fn volume(&self) -> f64 {
        self.order.volume()
    }
}
