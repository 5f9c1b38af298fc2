/// 可见区间的计算、裁剪与闭合

use ordered_float::OrderedFloat;

use super::series::SeriesPoint;
use super::window::{AxisMode, WindowParams};
use crate::config::WindowConfig;
use crate::orderbook::NormalizedOrder;

/// 中位数，偶数个元素时取中间两个的平均
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        Some(sorted[mid].0)
    } else {
        Some((sorted[mid - 1].0 + sorted[mid].0) / 2.0)
    }
}

/// 取整后的中位数（向零截断）
pub fn rounded_median(values: &[f64]) -> Option<f64> {
    median(values).map(f64::trunc)
}

/// 根据当前订单计算窗口中心、半宽与步长
///
/// 没有订单时返回 None（中心保持未定义）
pub fn compute_window(
    orders: &[NormalizedOrder],
    mode: AxisMode,
    premium_reference: Option<f64>,
    config: &WindowConfig,
) -> Option<WindowParams> {
    if orders.is_empty() {
        return None;
    }

    match mode {
        AxisMode::BaseAmount => {
            let prices: Vec<f64> = orders.iter().map(|o| o.base_amount).collect();
            let center = rounded_median(&prices)?;
            let max_price = prices
                .iter()
                .copied()
                .map(OrderedFloat)
                .max()
                .map(|v| v.0)
                .unwrap_or(center);
            let x_range = max_price - center;
            Some(WindowParams {
                center,
                x_range,
                range_steps: x_range / config.price_step_divisor,
            })
        }
        AxisMode::Premium => {
            let center = match premium_reference {
                Some(reference) => reference,
                None => {
                    let premiums: Vec<f64> = orders.iter().map(|o| o.premium()).collect();
                    rounded_median(&premiums)?
                }
            };
            Some(WindowParams {
                center,
                x_range: config.premium_half_width,
                range_steps: config.premium_step,
            })
        }
    }
}

/// x 是否位于开区间 (center - x_range, center + x_range)
pub fn in_window(x: f64, center: f64, x_range: f64) -> bool {
    x > center - x_range && x < center + x_range
}

/// 只保留窗口内的点，落在边界上的点也会被丢弃
pub fn clip_to_window(points: Vec<SeriesPoint>, center: f64, x_range: f64) -> Vec<SeriesPoint> {
    points
        .into_iter()
        .filter(|p| in_window(p.x, center, x_range))
        .collect()
}

/// 用合成点把序列延伸到窗口边缘
///
/// 首点y不为0时在 limit_bottom 处补一个同高度的点（窗口外的订单已经贡献了累计量）；
/// 末尾总是在 limit_top 处补一个与最后一点同高度的点。空序列保持为空。
pub fn close_series(
    mut points: Vec<SeriesPoint>,
    limit_bottom: f64,
    limit_top: f64,
) -> Vec<SeriesPoint> {
    let (first_y, last_y) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.y, last.y),
        _ => return points,
    };

    if first_y != 0.0 {
        points.insert(0, SeriesPoint::boundary(limit_bottom, first_y));
    }
    points.push(SeriesPoint::boundary(limit_top, last_y));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::{Order, OrderSide};

    fn normalized(premium: f64, base_amount: f64) -> NormalizedOrder {
        NormalizedOrder {
            order: Order::new(1, OrderSide::Sell, base_amount, premium),
            base_amount,
        }
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_rounded_median_truncates() {
        assert_eq!(rounded_median(&[1.0, 2.0]), Some(1.0));
        assert_eq!(rounded_median(&[-1.0, -2.0]), Some(-1.0));
        assert_eq!(rounded_median(&[100.9]), Some(100.0));
    }

    #[test]
    fn test_price_window_uses_median_and_max() {
        let orders = vec![normalized(0.0, 100.0), normalized(0.0, 150.5), normalized(0.0, 300.0)];
        let params = compute_window(&orders, AxisMode::BaseAmount, Some(5.0), &WindowConfig::default())
            .unwrap();

        assert_eq!(params.center, 150.0);
        assert_eq!(params.x_range, 150.0);
        assert_eq!(params.range_steps, 15.0);
    }

    #[test]
    fn test_premium_window_prefers_reference() {
        let orders = vec![normalized(-3.0, 0.0), normalized(1.0, 0.0), normalized(5.0, 0.0)];
        let config = WindowConfig::default();

        let with_reference = compute_window(&orders, AxisMode::Premium, Some(2.25), &config).unwrap();
        assert_eq!(with_reference.center, 2.25);
        assert_eq!(with_reference.x_range, 8.0);
        assert_eq!(with_reference.range_steps, 0.5);

        let from_median = compute_window(&orders, AxisMode::Premium, None, &config).unwrap();
        assert_eq!(from_median.center, 1.0);
    }

    #[test]
    fn test_no_orders_no_window() {
        let config = WindowConfig::default();
        assert!(compute_window(&[], AxisMode::Premium, Some(1.0), &config).is_none());
        assert!(compute_window(&[], AxisMode::BaseAmount, None, &config).is_none());
    }

    #[test]
    fn test_clip_drops_boundary_points() {
        let points = vec![
            SeriesPoint::new(-8.0, 0.0),
            SeriesPoint::new(-7.99, 1.0),
            SeriesPoint::new(7.99, 2.0),
            SeriesPoint::new(8.0, 3.0),
        ];
        let clipped = clip_to_window(points, 0.0, 8.0);
        let xs: Vec<f64> = clipped.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![-7.99, 7.99]);
    }

    #[test]
    fn test_close_empty_series_stays_empty() {
        assert!(close_series(Vec::new(), -8.0, 8.0).is_empty());
    }

    #[test]
    fn test_close_prepends_only_when_first_y_nonzero() {
        let starts_at_zero = close_series(
            vec![SeriesPoint::new(1.0, 0.0), SeriesPoint::new(1.0, 2.0)],
            -8.0,
            8.0,
        );
        assert_eq!(starts_at_zero.len(), 3);
        assert_eq!((starts_at_zero[2].x, starts_at_zero[2].y), (8.0, 2.0));

        let starts_high = close_series(
            vec![SeriesPoint::new(1.0, 5.0), SeriesPoint::new(1.0, 7.0)],
            -8.0,
            8.0,
        );
        assert_eq!(starts_high.len(), 4);
        assert_eq!((starts_high[0].x, starts_high[0].y), (-8.0, 5.0));
        assert_eq!((starts_high[3].x, starts_high[3].y), (8.0, 7.0));
        assert!(starts_high[0].is_synthetic());
        assert!(starts_high[3].is_synthetic());
        assert!(!starts_high[1].is_synthetic());
        assert!(!starts_at_zero[0].is_synthetic());
    }
}
