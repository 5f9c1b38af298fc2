use chrono::{DateTime, Utc};

use crate::config::WindowConfig;
use crate::depth::{
    build_chart_data, compute_window, normalize_orders, AxisMode, ChartData, WindowState,
};
use crate::events::{EventType, InputSignal, RecomputeStage, RecomputeTarget};
use crate::orderbook::{
    coerce_currency, CoordinatorLimits, CurrencyCode, NormalizedOrder, Order, DEFAULT_CURRENCY,
};

/// 深度图的输入与派生状态
///
/// 输入只通过事件修改，派生状态（归一化订单、窗口、序列）只在重算阶段中修改
#[derive(Debug, Clone)]
pub struct DepthChartModel {
    window_config: WindowConfig,

    // 输入
    orders: Vec<Order>,
    limits: CoordinatorLimits,
    limits_updated_at: Option<DateTime<Utc>>,
    currency: CurrencyCode,
    premium_reference: Option<f64>,

    // 派生状态
    normalized: Vec<NormalizedOrder>,
    window: WindowState,
    chart: Option<ChartData>,
}

impl DepthChartModel {
    pub fn new(mode: AxisMode, window_config: WindowConfig) -> Self {
        let window = WindowState::new(mode, &window_config);
        Self {
            window_config,
            orders: Vec::new(),
            limits: CoordinatorLimits::new(),
            limits_updated_at: None,
            currency: DEFAULT_CURRENCY,
            premium_reference: None,
            normalized: Vec::new(),
            window,
            chart: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn normalized_orders(&self) -> &[NormalizedOrder] {
        &self.normalized
    }

    pub fn limits(&self) -> &CoordinatorLimits {
        &self.limits
    }

    pub fn limits_updated_at(&self) -> Option<DateTime<Utc>> {
        self.limits_updated_at
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    pub fn premium_reference(&self) -> Option<f64> {
        self.premium_reference
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn window_config(&self) -> &WindowConfig {
        &self.window_config
    }

    pub fn chart_data(&self) -> Option<&ChartData> {
        self.chart.as_ref()
    }

    pub fn can_shrink_range(&self) -> bool {
        self.window.can_shrink_range(self.window_config.min_half_width)
    }
}

impl RecomputeTarget for DepthChartModel {
    fn apply_input(&mut self, event: &EventType) -> Option<InputSignal> {
        match event {
            EventType::OrderBookUpdated(orders) => {
                self.orders = orders.clone();
                Some(InputSignal::Orders)
            }
            EventType::LimitsUpdated { limits, updated_at } => {
                // 时间戳不变时保留当前限额，与已生成的图表保持一致
                if self.limits_updated_at == Some(*updated_at) {
                    return None;
                }
                self.limits = limits.clone();
                self.limits_updated_at = Some(*updated_at);
                Some(InputSignal::LimitsTimestamp)
            }
            EventType::CurrencyChanged(code) => {
                let currency = coerce_currency(*code);
                if currency == self.currency {
                    return None;
                }
                self.currency = currency;
                Some(InputSignal::Currency)
            }
            EventType::AxisModeChanged(mode) => {
                if self.window.set_mode(*mode) {
                    Some(InputSignal::AxisMode)
                } else {
                    None
                }
            }
            EventType::PremiumReferenceChanged(reference) => {
                if *reference == self.premium_reference {
                    return None;
                }
                self.premium_reference = *reference;
                Some(InputSignal::PremiumReference)
            }
            EventType::ExpandRange => {
                self.window.expand_range();
                Some(InputSignal::Window)
            }
            EventType::ShrinkRange => {
                if self.window.shrink_range(self.window_config.min_half_width) {
                    Some(InputSignal::Window)
                } else {
                    None
                }
            }
        }
    }

    fn run_stage(&mut self, stage: RecomputeStage) -> Vec<InputSignal> {
        match stage {
            RecomputeStage::Normalize => {
                self.normalized = normalize_orders(&self.orders, self.currency, &self.limits);
                vec![InputSignal::NormalizedOrders]
            }
            RecomputeStage::Recenter => {
                match compute_window(
                    &self.normalized,
                    self.window.mode(),
                    self.premium_reference,
                    &self.window_config,
                ) {
                    Some(params) => self.window.apply(params),
                    None => self.window.clear_center(),
                }
                vec![InputSignal::Window]
            }
            RecomputeStage::BuildSeries => {
                self.chart = build_chart_data(&self.normalized, &self.window);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::{Limit, LimitList, OrderSide};

    #[test]
    fn test_currency_zero_is_coerced_and_ignored() {
        let mut model = DepthChartModel::new(AxisMode::Premium, WindowConfig::default());
        assert_eq!(model.apply_input(&EventType::CurrencyChanged(0)), None);
        assert_eq!(model.currency(), 1);
        assert_eq!(
            model.apply_input(&EventType::CurrencyChanged(2)),
            Some(InputSignal::Currency)
        );
    }

    #[test]
    fn test_same_limits_timestamp_does_not_trigger() {
        let mut model = DepthChartModel::new(AxisMode::Premium, WindowConfig::default());
        let updated_at = Utc::now();
        let event = EventType::LimitsUpdated {
            limits: CoordinatorLimits::new(),
            updated_at,
        };
        assert_eq!(model.apply_input(&event), Some(InputSignal::LimitsTimestamp));
        assert_eq!(model.apply_input(&event), None);
    }

    #[test]
    fn test_stale_limits_are_not_stored() {
        let mut model = DepthChartModel::new(AxisMode::Premium, WindowConfig::default());
        let updated_at = Utc::now();
        model.apply_input(&EventType::LimitsUpdated {
            limits: CoordinatorLimits::new(),
            updated_at,
        });

        let mut list = LimitList::new();
        list.insert(1, Limit { code: "USD".to_string(), price: 60000.0, ..Default::default() });
        let mut newer = CoordinatorLimits::new();
        newer.insert("alpha", list);

        let same_timestamp = EventType::LimitsUpdated {
            limits: newer.clone(),
            updated_at,
        };
        assert_eq!(model.apply_input(&same_timestamp), None);
        assert!(model.limits().is_empty());

        let later = EventType::LimitsUpdated {
            limits: newer,
            updated_at: updated_at + chrono::Duration::seconds(1),
        };
        assert_eq!(model.apply_input(&later), Some(InputSignal::LimitsTimestamp));
        assert_eq!(model.limits().currency_label(1), Some("USD"));
    }

    #[test]
    fn test_recenter_without_orders_clears_center() {
        let mut model = DepthChartModel::new(AxisMode::Premium, WindowConfig::default());
        model.apply_input(&EventType::OrderBookUpdated(vec![
            Order::new(1, OrderSide::Sell, 100.0, 2.0).with_satoshis(100_000_000),
        ]));
        for stage in RecomputeStage::PIPELINE {
            model.run_stage(stage);
        }
        assert_eq!(model.window().center(), Some(2.0));

        model.apply_input(&EventType::OrderBookUpdated(Vec::new()));
        for stage in RecomputeStage::PIPELINE {
            model.run_stage(stage);
        }
        assert_eq!(model.window().center(), None);
        assert!(model.chart_data().is_none());
    }
}
