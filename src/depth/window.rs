/// 可见窗口状态：中心、半宽、缩放步长与横轴模式

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::WindowConfig;

/// 横轴度量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// 溢价（百分比）
    #[default]
    Premium,
    /// 以参考币种表示的价格
    BaseAmount,
}

impl AxisMode {
    pub fn toggled(self) -> Self {
        match self {
            AxisMode::Premium => AxisMode::BaseAmount,
            AxisMode::BaseAmount => AxisMode::Premium,
        }
    }

    /// 横轴标题的翻译键
    pub fn label_key(&self) -> &'static str {
        match self {
            AxisMode::Premium => "Premium",
            AxisMode::BaseAmount => "Price",
        }
    }
}

impl FromStr for AxisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "premium" => Ok(AxisMode::Premium),
            "price" | "base_amount" => Ok(AxisMode::BaseAmount),
            other => Err(format!("unknown axis mode: {}", other)),
        }
    }
}

/// 重新定中心得到的窗口参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    pub center: f64,
    pub x_range: f64,
    pub range_steps: f64,
}

/// 窗口状态
///
/// center 在第一次有归一化订单之前为 None，此时不计算任何序列
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    center: Option<f64>,
    x_range: f64,
    range_steps: f64,
    mode: AxisMode,
}

impl WindowState {
    pub fn new(mode: AxisMode, config: &WindowConfig) -> Self {
        Self {
            center: None,
            x_range: config.premium_half_width,
            range_steps: config.premium_step,
            mode,
        }
    }

    pub fn center(&self) -> Option<f64> {
        self.center
    }

    pub fn x_range(&self) -> f64 {
        self.x_range
    }

    pub fn range_steps(&self) -> f64 {
        self.range_steps
    }

    pub fn mode(&self) -> AxisMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AxisMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn is_ready(&self) -> bool {
        self.center.is_some()
    }

    pub fn apply(&mut self, params: WindowParams) {
        self.center = Some(params.center);
        self.x_range = params.x_range;
        self.range_steps = params.range_steps;
    }

    pub fn clear_center(&mut self) {
        self.center = None;
    }

    /// 可见区间 (center - x_range, center + x_range)
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.center
            .map(|center| (center - self.x_range, center + self.x_range))
    }

    /// 半宽不大于下限时禁止继续收窄
    pub fn can_shrink_range(&self, min_half_width: f64) -> bool {
        self.x_range > min_half_width
    }

    pub fn shrink_range(&mut self, min_half_width: f64) -> bool {
        if !self.can_shrink_range(min_half_width) {
            return false;
        }
        self.x_range -= self.range_steps;
        if self.x_range <= 0.0 {
            log::warn!("窗口半宽收窄到 {}，可见区间为空", self.x_range);
        }
        true
    }

    /// 放宽窗口，没有上限
    pub fn expand_range(&mut self) {
        self.x_range += self.range_steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_has_no_center() {
        let state = WindowState::new(AxisMode::Premium, &WindowConfig::default());
        assert!(!state.is_ready());
        assert_eq!(state.bounds(), None);
        assert_eq!(state.x_range(), 8.0);
        assert_eq!(state.range_steps(), 0.5);
    }

    #[test]
    fn test_shrink_disabled_at_floor() {
        let mut state = WindowState::new(AxisMode::Premium, &WindowConfig::default());
        state.apply(WindowParams { center: 0.0, x_range: 1.0, range_steps: 0.5 });

        assert!(!state.can_shrink_range(1.0));
        assert!(!state.shrink_range(1.0));
        assert_eq!(state.x_range(), 1.0);
    }

    #[test]
    fn test_shrink_and_expand_by_step() {
        let mut state = WindowState::new(AxisMode::Premium, &WindowConfig::default());
        state.apply(WindowParams { center: 2.0, x_range: 8.0, range_steps: 0.5 });

        assert!(state.shrink_range(1.0));
        assert_eq!(state.x_range(), 7.5);
        state.expand_range();
        state.expand_range();
        assert_eq!(state.x_range(), 8.5);
        assert_eq!(state.bounds(), Some((-6.5, 10.5)));
    }

    #[test]
    fn test_expand_has_no_ceiling() {
        let mut state = WindowState::new(AxisMode::Premium, &WindowConfig::default());
        state.apply(WindowParams { center: 0.0, x_range: 8.0, range_steps: 0.5 });
        for _ in 0..1000 {
            state.expand_range();
        }
        assert_eq!(state.x_range(), 508.0);
    }

    #[test]
    fn test_axis_mode_parsing_and_labels() {
        assert_eq!("price".parse::<AxisMode>().unwrap(), AxisMode::BaseAmount);
        assert_eq!("Premium".parse::<AxisMode>().unwrap(), AxisMode::Premium);
        assert!("volume".parse::<AxisMode>().is_err());
        assert_eq!(AxisMode::Premium.toggled().label_key(), "Price");
    }
}
