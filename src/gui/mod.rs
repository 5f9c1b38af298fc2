/// GUI模块 - 深度图窗口（需要 gui 特性）
pub mod depth_chart_widget;
pub mod egui_app;

pub use depth_chart_widget::DepthChartWidget;
pub use egui_app::DepthSightGui;
