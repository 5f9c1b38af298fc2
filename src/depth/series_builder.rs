/// 累计深度序列的生成
///
/// 按当前横轴度量升序排序，拆分买卖两组（买单组反转，从中心向外累加），
/// 每笔订单输出一对阶梯点，再裁剪到可见窗口并闭合到窗口边缘。

use ordered_float::OrderedFloat;

use super::domain::{clip_to_window, close_series};
use super::series::{ChartData, Series, SeriesId, SeriesPoint};
use super::window::{AxisMode, WindowState};
use crate::orderbook::{NormalizedOrder, OrderSide};

/// 订单在当前横轴模式下的坐标
pub fn metric(order: &NormalizedOrder, mode: AxisMode) -> f64 {
    match mode {
        AxisMode::Premium => order.premium(),
        AxisMode::BaseAmount => order.base_amount,
    }
}

/// 按度量升序排列（稳定排序）
pub fn sort_by_metric(orders: &[NormalizedOrder], mode: AxisMode) -> Vec<&NormalizedOrder> {
    let mut sorted: Vec<&NormalizedOrder> = orders.iter().collect();
    sorted.sort_by_key(|order| OrderedFloat(metric(order, mode)));
    sorted
}

/// 一组订单的阶梯点（未裁剪）
fn step_points(orders: &[&NormalizedOrder], mode: AxisMode) -> Vec<SeriesPoint> {
    let mut points = Vec::with_capacity(orders.len() * 2);
    let mut sum_orders = 0.0;

    for order in orders {
        let x = metric(order, mode);
        let last_sum_orders = sum_orders;
        sum_orders += order.volume();
        points.push(SeriesPoint::new(x, last_sum_orders));
        points.push(SeriesPoint::with_order(x, sum_orders, order.order.clone()));
    }

    points
}

/// 买卖两组裁剪后的阶梯点
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideSeries {
    pub buy: Vec<SeriesPoint>,
    pub sell: Vec<SeriesPoint>,
}

/// 生成买卖两组阶梯点并裁剪到 (center - x_range, center + x_range)
///
/// center 未定义时直接返回空结果
pub fn build_series(
    orders: &[NormalizedOrder],
    mode: AxisMode,
    center: Option<f64>,
    x_range: f64,
) -> SideSeries {
    let center = match center {
        Some(center) => center,
        None => return SideSeries::default(),
    };

    let sorted = sort_by_metric(orders, mode);
    let mut buy_orders: Vec<&NormalizedOrder> = sorted
        .iter()
        .copied()
        .filter(|o| o.side() == OrderSide::Buy)
        .collect();
    buy_orders.reverse();
    let sell_orders: Vec<&NormalizedOrder> = sorted
        .iter()
        .copied()
        .filter(|o| o.side() == OrderSide::Sell)
        .collect();

    SideSeries {
        buy: clip_to_window(step_points(&buy_orders, mode), center, x_range),
        sell: clip_to_window(step_points(&sell_orders, mode), center, x_range),
    }
}

/// 完整流程：生成、裁剪并闭合两条序列
///
/// 买单序列从窗口右边缘闭合到左边缘，卖单序列从左边缘闭合到右边缘
pub fn build_chart_data(orders: &[NormalizedOrder], window: &WindowState) -> Option<ChartData> {
    let center = window.center()?;
    let x_range = window.x_range();
    let mode = window.mode();

    let sides = build_series(orders, mode, Some(center), x_range);
    let min_x = center - x_range;
    let max_x = center + x_range;

    let buy = Series::new(SeriesId::Buy, close_series(sides.buy, max_x, min_x));
    let sell = Series::new(SeriesId::Sell, close_series(sides.sell, min_x, max_x));

    log::debug!(
        "生成深度序列: mode={:?} center={} x_range={} buy={} sell={}",
        mode,
        center,
        x_range,
        buy.len(),
        sell.len()
    );

    Some(ChartData {
        mode,
        center,
        x_range,
        buy,
        sell,
    })
}
