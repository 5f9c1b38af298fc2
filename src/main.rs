use std::env;
use std::process;

use chrono::Utc;
use serde::Serialize;

use depth_sight::config::load_config;
use depth_sight::depth::ChartData;
use depth_sight::orderbook::{load_limits, load_orders};
use depth_sight::{init_logging, AxisMode, DepthChartApp};

const USAGE: &str = "usage: depth_sight <orders.json> [limits.json] [--currency N] \
[--mode premium|price] [--premium-ref X] [--config path]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    orders_path: String,
    limits_path: Option<String>,
    currency: u32,
    mode: AxisMode,
    premium_reference: Option<f64>,
    config_path: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--currency" => {
                let value = iter.next().ok_or("--currency needs a value")?;
                parsed.currency = value
                    .parse()
                    .map_err(|_| format!("invalid currency code: {}", value))?;
            }
            "--mode" => {
                let value = iter.next().ok_or("--mode needs a value")?;
                parsed.mode = value.parse()?;
            }
            "--premium-ref" => {
                let value = iter.next().ok_or("--premium-ref needs a value")?;
                parsed.premium_reference = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid premium reference: {}", value))?,
                );
            }
            "--config" => {
                let value = iter.next().ok_or("--config needs a value")?;
                parsed.config_path = Some(value.clone());
            }
            other if other.starts_with("--") => return Err(format!("unknown option: {}", other)),
            other => positional.push(other.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    parsed.orders_path = positional.next().ok_or("missing orders file")?;
    parsed.limits_path = positional.next();
    Ok(parsed)
}

#[derive(Serialize)]
struct CliOutput<'a> {
    status: &'static str,
    axis_label: String,
    can_shrink_range: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<&'a ChartData>,
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args.config_path.as_deref().unwrap_or("depth_sight.toml"))?;
    init_logging(&config);
    log::info!("depth_sight {} 启动", depth_sight::VERSION);

    let mut app = DepthChartApp::with_mode(config, args.mode);
    app.set_currency(args.currency);
    if let Some(path) = &args.limits_path {
        app.update_limits(load_limits(path)?, Utc::now());
    }
    app.set_premium_reference(args.premium_reference);
    app.update_orders(load_orders(&args.orders_path)?);

    let output = CliOutput {
        status: if app.is_loading() { "loading" } else { "ready" },
        axis_label: app.axis_label(&|key: &str| key.to_string()),
        can_shrink_range: app.can_shrink_range(),
        chart: app.chart_data(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
