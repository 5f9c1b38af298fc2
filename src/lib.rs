// 核心模块
pub mod app;
pub mod config;
pub mod depth;
pub mod events;
pub mod orderbook;

#[cfg(feature = "gui")]
pub mod gui;

// 重新导出主要类型
pub use app::{DepthChartApp, DepthChartModel};
pub use config::{ConfigError, DepthChartConfig};
pub use depth::{AxisMode, ChartData, Series, SeriesId, SeriesPoint, WindowState};
pub use events::{ChangeDispatcher, Event, EventType};
pub use orderbook::{CoordinatorLimits, NormalizedOrder, Order, OrderSide};

/// 库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 初始化日志系统 - 写入日志文件以避免干扰界面和标准输出
pub fn init_logging(config: &DepthChartConfig) {
    use std::fs::OpenOptions;

    let builder_level = config.log_level_filter();
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(builder_level);

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.system.log_file)
    {
        Ok(log_file) => {
            builder.target(env_logger::Target::Pipe(Box::new(log_file)));
        }
        Err(_) => {
            // 如果无法创建日志文件，就完全禁用日志
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    // 重复初始化时忽略错误（测试中可能多次调用）
    let _ = builder.try_init();
}
