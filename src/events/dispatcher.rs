use std::collections::{HashSet, VecDeque};

use super::event_types::{Event, EventType, InputSignal, RecomputeStage};

/// 重算目标：接收输入事件并执行各个重算阶段
pub trait RecomputeTarget {
    /// 应用输入变化，返回对应的信号；输入没有实际变化时返回 None
    fn apply_input(&mut self, event: &EventType) -> Option<InputSignal>;

    /// 执行一个阶段，返回它派生出的新信号
    fn run_stage(&mut self, stage: RecomputeStage) -> Vec<InputSignal>;
}

/// 分发器统计信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatcherStats {
    pub total_events_published: u64,
    pub total_events_processed: u64,
    /// 没有引起任何变化的事件
    pub ignored_events: u64,
    pub stages_run: u64,
}

/// 变化通知分发器
///
/// 单线程、同步：事件按发布顺序逐个处理，每个事件先更新输入，
/// 再按流水线顺序执行被其信号触发的阶段。
#[derive(Debug, Default)]
pub struct ChangeDispatcher {
    pending: VecDeque<Event>,
    stats: DispatcherStats,
}

impl ChangeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发布事件到队列
    pub fn publish(&mut self, event: Event) {
        log::trace!("发布事件: {} (来源: {})", event.event_type.type_name(), event.source);
        self.pending.push_back(event);
        self.stats.total_events_published += 1;
    }

    /// 批量发布事件
    pub fn publish_batch(&mut self, events: Vec<Event>) {
        for event in events {
            self.publish(event);
        }
    }

    /// 处理下一个事件，队列为空时返回 None，否则返回执行过的阶段
    pub fn process_next_event<T: RecomputeTarget>(
        &mut self,
        target: &mut T,
    ) -> Option<Vec<RecomputeStage>> {
        let event = self.pending.pop_front()?;
        Some(self.dispatch(&event, target))
    }

    /// 处理所有待处理事件，返回处理的事件数量
    pub fn process_all_events<T: RecomputeTarget>(&mut self, target: &mut T) -> usize {
        let mut processed = 0;
        while self.process_next_event(target).is_some() {
            processed += 1;
        }
        processed
    }

    /// 立即处理一个事件（不经过队列）
    pub fn dispatch<T: RecomputeTarget>(
        &mut self,
        event: &Event,
        target: &mut T,
    ) -> Vec<RecomputeStage> {
        self.stats.total_events_processed += 1;

        let mut signals: HashSet<InputSignal> = HashSet::new();
        match target.apply_input(&event.event_type) {
            Some(signal) => {
                signals.insert(signal);
            }
            None => {
                log::trace!("事件 {} 未改变输入，跳过重算", event.event_type.type_name());
                self.stats.ignored_events += 1;
                return Vec::new();
            }
        }

        let mut ran = Vec::new();
        for stage in RecomputeStage::PIPELINE {
            if stage.triggers().iter().any(|t| signals.contains(t)) {
                let derived = target.run_stage(stage);
                signals.extend(derived);
                ran.push(stage);
                self.stats.stages_run += 1;
            }
        }

        log::debug!(
            "事件 {} 触发阶段: {:?}",
            event.event_type.type_name(),
            ran.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        ran
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    /// 清空所有待处理事件
    pub fn clear_events(&mut self) {
        self.pending.clear();
    }

    pub fn stats(&self) -> &DispatcherStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = DispatcherStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::AxisMode;

    /// 记录阶段执行顺序的测试目标
    #[derive(Default)]
    struct RecordingTarget {
        stages: Vec<RecomputeStage>,
        mode: AxisMode,
    }

    impl RecomputeTarget for RecordingTarget {
        fn apply_input(&mut self, event: &EventType) -> Option<InputSignal> {
            match event {
                EventType::OrderBookUpdated(_) => Some(InputSignal::Orders),
                EventType::AxisModeChanged(mode) => {
                    if *mode == self.mode {
                        None
                    } else {
                        self.mode = *mode;
                        Some(InputSignal::AxisMode)
                    }
                }
                EventType::ExpandRange | EventType::ShrinkRange => Some(InputSignal::Window),
                _ => None,
            }
        }

        fn run_stage(&mut self, stage: RecomputeStage) -> Vec<InputSignal> {
            self.stages.push(stage);
            match stage {
                RecomputeStage::Normalize => vec![InputSignal::NormalizedOrders],
                RecomputeStage::Recenter => vec![InputSignal::Window],
                RecomputeStage::BuildSeries => Vec::new(),
            }
        }
    }

    fn event(event_type: EventType) -> Event {
        Event::new(event_type, "test".to_string())
    }

    #[test]
    fn test_orders_run_full_pipeline() {
        let mut dispatcher = ChangeDispatcher::new();
        let mut target = RecordingTarget::default();

        let ran = dispatcher.dispatch(&event(EventType::OrderBookUpdated(Vec::new())), &mut target);
        assert_eq!(ran, RecomputeStage::PIPELINE.to_vec());
    }

    #[test]
    fn test_zoom_only_rebuilds_series() {
        let mut dispatcher = ChangeDispatcher::new();
        let mut target = RecordingTarget::default();

        let ran = dispatcher.dispatch(&event(EventType::ExpandRange), &mut target);
        assert_eq!(ran, vec![RecomputeStage::BuildSeries]);
    }

    #[test]
    fn test_axis_mode_skips_normalize() {
        let mut dispatcher = ChangeDispatcher::new();
        let mut target = RecordingTarget::default();

        let ran = dispatcher.dispatch(
            &event(EventType::AxisModeChanged(AxisMode::BaseAmount)),
            &mut target,
        );
        assert_eq!(ran, vec![RecomputeStage::Recenter, RecomputeStage::BuildSeries]);

        // 相同模式不再触发
        let ran = dispatcher.dispatch(
            &event(EventType::AxisModeChanged(AxisMode::BaseAmount)),
            &mut target,
        );
        assert!(ran.is_empty());
        assert_eq!(dispatcher.stats().ignored_events, 1);
    }

    #[test]
    fn test_queue_is_processed_in_order() {
        let mut dispatcher = ChangeDispatcher::new();
        let mut target = RecordingTarget::default();

        dispatcher.publish_batch(vec![
            event(EventType::ExpandRange),
            event(EventType::OrderBookUpdated(Vec::new())),
        ]);
        assert_eq!(dispatcher.pending_events(), 2);

        let processed = dispatcher.process_all_events(&mut target);
        assert_eq!(processed, 2);
        assert!(!dispatcher.has_pending_events());
        assert_eq!(
            target.stages,
            vec![
                RecomputeStage::BuildSeries,
                RecomputeStage::Normalize,
                RecomputeStage::Recenter,
                RecomputeStage::BuildSeries,
            ]
        );

        let stats = dispatcher.stats();
        assert_eq!(stats.total_events_published, 2);
        assert_eq!(stats.total_events_processed, 2);
        assert_eq!(stats.stages_run, 4);
    }
}
