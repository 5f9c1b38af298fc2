use chrono::{DateTime, Utc};

use super::model::DepthChartModel;
use crate::config::DepthChartConfig;
use crate::depth::{axis_label, AxisMode, ChartData, OrderTooltip, WindowState};
use crate::events::{ChangeDispatcher, DispatcherStats, Event, EventType, RecomputeStage};
use crate::orderbook::{CoordinatorLimits, CurrencyCode, Order};

/// 订单点击回调：(订单id, 协调者)
pub type OrderClickCallback = Box<dyn FnMut(u64, Option<&str>)>;

/// 响应式深度图应用（基于变化通知分发器）
///
/// 所有输入变化都以事件形式进入，分发器按阶段声明的触发信号同步重算
pub struct DepthChartApp {
    dispatcher: ChangeDispatcher,
    model: DepthChartModel,
    config: DepthChartConfig,
    on_order_clicked: Option<OrderClickCallback>,
}

impl DepthChartApp {
    pub fn new(config: DepthChartConfig) -> Self {
        Self::with_mode(config, AxisMode::default())
    }

    pub fn with_mode(config: DepthChartConfig, mode: AxisMode) -> Self {
        let model = DepthChartModel::new(mode, config.window.clone());
        Self {
            dispatcher: ChangeDispatcher::new(),
            model,
            config,
            on_order_clicked: None,
        }
    }

    /// 注册订单点击回调
    pub fn set_on_order_clicked<F>(&mut self, callback: F)
    where
        F: FnMut(u64, Option<&str>) + 'static,
    {
        self.on_order_clicked = Some(Box::new(callback));
    }

    /// 把事件放入队列，等待 event_loop 处理
    pub fn publish(&mut self, event_type: EventType, source: &str) {
        self.dispatcher.publish(Event::new(event_type, source.to_string()));
    }

    /// 处理所有排队的事件，返回处理数量
    pub fn event_loop(&mut self) -> usize {
        self.dispatcher.process_all_events(&mut self.model)
    }

    /// 立即处理一个事件，返回执行过的阶段
    pub fn apply(&mut self, event_type: EventType) -> Vec<RecomputeStage> {
        let event = Event::new(event_type, "app".to_string());
        self.dispatcher.dispatch(&event, &mut self.model)
    }

    pub fn update_orders(&mut self, orders: Vec<Order>) -> Vec<RecomputeStage> {
        self.apply(EventType::OrderBookUpdated(orders))
    }

    pub fn update_limits(
        &mut self,
        limits: CoordinatorLimits,
        updated_at: DateTime<Utc>,
    ) -> Vec<RecomputeStage> {
        self.apply(EventType::LimitsUpdated { limits, updated_at })
    }

    pub fn set_currency(&mut self, currency: CurrencyCode) -> Vec<RecomputeStage> {
        self.apply(EventType::CurrencyChanged(currency))
    }

    pub fn set_axis_mode(&mut self, mode: AxisMode) -> Vec<RecomputeStage> {
        self.apply(EventType::AxisModeChanged(mode))
    }

    pub fn toggle_axis_mode(&mut self) -> Vec<RecomputeStage> {
        let mode = self.model.window().mode().toggled();
        self.set_axis_mode(mode)
    }

    pub fn set_premium_reference(&mut self, reference: Option<f64>) -> Vec<RecomputeStage> {
        self.apply(EventType::PremiumReferenceChanged(reference))
    }

    pub fn expand_range(&mut self) -> Vec<RecomputeStage> {
        self.apply(EventType::ExpandRange)
    }

    pub fn shrink_range(&mut self) -> Vec<RecomputeStage> {
        self.apply(EventType::ShrinkRange)
    }

    /// 收窄按钮是否可用
    pub fn can_shrink_range(&self) -> bool {
        self.model.can_shrink_range()
    }

    /// 中心未定义时界面显示加载状态
    pub fn is_loading(&self) -> bool {
        !self.model.window().is_ready()
    }

    pub fn chart_data(&self) -> Option<&ChartData> {
        self.model.chart_data()
    }

    pub fn window(&self) -> &WindowState {
        self.model.window()
    }

    pub fn model(&self) -> &DepthChartModel {
        &self.model
    }

    pub fn config(&self) -> &DepthChartConfig {
        &self.config
    }

    pub fn stats(&self) -> &DispatcherStats {
        self.dispatcher.stats()
    }

    pub fn pending_events(&self) -> usize {
        self.dispatcher.pending_events()
    }

    /// 横轴标题
    pub fn axis_label(&self, translate: &dyn Fn(&str) -> String) -> String {
        axis_label(self.model.window().mode(), translate)
    }

    /// 当前参考币种的显示代码
    pub fn currency_label(&self) -> String {
        self.model
            .limits()
            .currency_label(self.model.currency())
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", self.model.currency()))
    }

    /// x坐标附近订单的悬停提示
    pub fn tooltip_at(&self, x: f64) -> Option<OrderTooltip> {
        let order = self.chart_data()?.nearest_order(x)?;
        Some(OrderTooltip::from_order(
            order,
            &self.currency_label(),
            &self.config.chart.volume_suffix,
        ))
    }

    /// 点击x坐标附近的订单，触发回调并返回订单id
    pub fn click_at(&mut self, x: f64) -> Option<u64> {
        let (id, coordinator) = {
            let order = self.model.chart_data()?.nearest_order(x)?;
            (order.id, order.coordinator.clone())
        };
        log::debug!("点击订单 {} (协调者: {:?})", id, coordinator);
        if let Some(callback) = self.on_order_clicked.as_mut() {
            callback(id, coordinator.as_deref());
        }
        Some(id)
    }
}
