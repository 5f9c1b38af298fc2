use std::env;
use std::process;

use chrono::Utc;

use depth_sight::config::load_config;
use depth_sight::gui::DepthSightGui;
use depth_sight::orderbook::{load_limits, load_orders};
use depth_sight::{init_logging, DepthChartApp};

const USAGE: &str = "usage: depth_sight_gui <orders.json> [limits.json] [--config path]";

fn build_app(args: &[String]) -> Result<DepthChartApp, Box<dyn std::error::Error>> {
    let mut config_path = "depth_sight.toml".to_string();
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config_path = iter.next().ok_or("--config needs a value")?.clone();
        } else {
            positional.push(arg.clone());
        }
    }

    let config = load_config(&config_path)?;
    init_logging(&config);
    log::info!("depth_sight_gui {} 启动", depth_sight::VERSION);

    let mut app = DepthChartApp::new(config);
    let mut positional = positional.into_iter();
    let orders_path = positional.next().ok_or("missing orders file")?;
    if let Some(limits_path) = positional.next() {
        app.update_limits(load_limits(&limits_path)?, Utc::now());
    }
    app.update_orders(load_orders(&orders_path)?);
    Ok(app)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let app = match build_app(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(2);
        }
    };

    let native_options = eframe::NativeOptions::default();
    if let Err(e) = eframe::run_native(
        "Depth Sight",
        native_options,
        Box::new(|_cc| Box::new(DepthSightGui::new(app))),
    ) {
        log::error!("GUI 运行失败: {}", e);
        eprintln!("GUI error: {}", e);
        process::exit(1);
    }
}
