// Depth chart configuration structures
// Every section has serde defaults so a partial TOML file is valid

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DepthChartConfig {
    pub system: SystemConfig,
    pub window: WindowConfig,
    pub chart: ChartConfig,
}

/// System configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    pub log_file: String,
}

/// Visible window parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Half-width used in premium mode (percentage points)
    pub premium_half_width: f64,
    /// Zoom step used in premium mode
    pub premium_step: f64,
    /// Price mode step = half-width / divisor
    pub price_step_divisor: f64,
    /// Shrinking the window is disabled at or below this half-width
    pub min_half_width: f64,
}

/// Chart presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub height: f32,
    pub show_grid: bool,
    pub show_center_marker: bool,
    pub buy_color: [u8; 4],
    pub sell_color: [u8; 4],
    pub volume_suffix: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_file: "depth_sight.log".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            premium_half_width: 8.0,
            premium_step: 0.5,
            price_step_divisor: 10.0,
            min_half_width: 1.0,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            show_grid: true,
            show_center_marker: true,
            buy_color: [76, 175, 80, 200],
            sell_color: [244, 67, 54, 200],
            volume_suffix: "BTC".to_string(),
        }
    }
}

impl DepthChartConfig {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.system
            .log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Warn)
    }
}
