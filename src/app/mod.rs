pub mod model;
pub mod reactive_app;

pub use model::DepthChartModel;
pub use reactive_app::{DepthChartApp, OrderClickCallback};
