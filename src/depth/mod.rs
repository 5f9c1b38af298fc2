/// 深度图核心计算
///
/// - normalizer: 价格归一化
/// - series_builder: 累计阶梯序列
/// - domain: 窗口中心计算、裁剪与闭合
/// - window: 窗口状态与缩放
/// - series: 输出数据类型
/// - display_formatter: 坐标轴与提示文本

pub mod display_formatter;
pub mod domain;
pub mod normalizer;
pub mod series;
pub mod series_builder;
pub mod window;

pub use display_formatter::{axis_label, format_x_tick, OrderTooltip};
pub use domain::{close_series, compute_window, rounded_median};
pub use normalizer::normalize_orders;
pub use series::{ChartData, Series, SeriesId, SeriesPoint};
pub use series_builder::{build_chart_data, build_series, SideSeries};
pub use window::{AxisMode, WindowParams, WindowState};
