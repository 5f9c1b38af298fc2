use chrono::{DateTime, Utc};

use crate::depth::AxisMode;
use crate::orderbook::{CoordinatorLimits, CurrencyCode, Order};

/// 输入变化事件
#[derive(Debug, Clone)]
pub enum EventType {
    /// 新的订单簿快照
    OrderBookUpdated(Vec<Order>),
    /// 协调者限额表刷新，带数据时间戳
    LimitsUpdated {
        limits: CoordinatorLimits,
        updated_at: DateTime<Utc>,
    },
    /// 参考币种切换（0 表示未设置）
    CurrencyChanged(CurrencyCode),
    /// 横轴模式切换
    AxisModeChanged(AxisMode),
    /// 外部24小时溢价参考值
    PremiumReferenceChanged(Option<f64>),
    /// 放宽窗口
    ExpandRange,
    /// 收窄窗口
    ShrinkRange,
}

impl EventType {
    /// 获取事件类型的字符串表示
    pub fn type_name(&self) -> &'static str {
        match self {
            EventType::OrderBookUpdated(_) => "OrderBookUpdated",
            EventType::LimitsUpdated { .. } => "LimitsUpdated",
            EventType::CurrencyChanged(_) => "CurrencyChanged",
            EventType::AxisModeChanged(_) => "AxisModeChanged",
            EventType::PremiumReferenceChanged(_) => "PremiumReferenceChanged",
            EventType::ExpandRange => "ExpandRange",
            EventType::ShrinkRange => "ShrinkRange",
        }
    }

    /// 检查是否为用户交互事件
    pub fn is_user_action(&self) -> bool {
        matches!(
            self,
            EventType::AxisModeChanged(_) | EventType::ExpandRange | EventType::ShrinkRange
        )
    }
}

/// 事件结构体
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub timestamp: u64,
    pub source: String,
}

impl Event {
    pub fn new(event_type: EventType, source: String) -> Self {
        Self {
            event_type,
            timestamp: Utc::now().timestamp_millis().max(0) as u64,
            source,
        }
    }
}

/// 重算阶段关心的输入信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSignal {
    Orders,
    LimitsTimestamp,
    Currency,
    AxisMode,
    PremiumReference,
    /// 归一化阶段产出的新订单集合
    NormalizedOrders,
    /// 窗口中心或半宽发生变化
    Window,
}

/// 重算阶段，按流水线顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecomputeStage {
    Normalize,
    Recenter,
    BuildSeries,
}

impl RecomputeStage {
    pub const PIPELINE: [RecomputeStage; 3] = [
        RecomputeStage::Normalize,
        RecomputeStage::Recenter,
        RecomputeStage::BuildSeries,
    ];

    /// 每个阶段显式声明的触发信号
    pub fn triggers(&self) -> &'static [InputSignal] {
        match self {
            RecomputeStage::Normalize => &[
                InputSignal::Orders,
                InputSignal::LimitsTimestamp,
                InputSignal::Currency,
            ],
            RecomputeStage::Recenter => &[
                InputSignal::NormalizedOrders,
                InputSignal::AxisMode,
                InputSignal::LimitsTimestamp,
                InputSignal::Currency,
                InputSignal::PremiumReference,
            ],
            RecomputeStage::BuildSeries => &[
                InputSignal::NormalizedOrders,
                InputSignal::AxisMode,
                InputSignal::Window,
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecomputeStage::Normalize => "normalize",
            RecomputeStage::Recenter => "recenter",
            RecomputeStage::BuildSeries => "build_series",
        }
    }
}
