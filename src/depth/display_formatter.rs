/// 坐标轴刻度与悬停提示的格式化

use serde::Serialize;

use super::window::AxisMode;
use crate::orderbook::Order;

/// 价格轴：整数
pub fn format_price_tick(value: f64) -> String {
    format!("{:.0}", value)
}

/// 溢价轴：追加 %
pub fn format_premium_tick(value: f64) -> String {
    format!("{}%", trim_float(value))
}

/// 成交量轴：追加币种单位
pub fn format_volume_tick(value: f64, suffix: &str) -> String {
    format!("{} {}", trim_float(value), suffix)
}

/// 按横轴模式格式化横轴刻度
pub fn format_x_tick(mode: AxisMode, value: f64) -> String {
    match mode {
        AxisMode::Premium => format_premium_tick(value),
        AxisMode::BaseAmount => format_price_tick(value),
    }
}

/// 横轴标题，经过外部翻译函数
pub fn axis_label(mode: AxisMode, translate: &dyn Fn(&str) -> String) -> String {
    translate(mode.label_key())
}

// 去掉浮点误差带来的长尾，例如 0.30000000000000004
fn trim_float(value: f64) -> String {
    let rounded = (value * 1e8).round() / 1e8;
    if rounded == 0.0 {
        // 避免输出 -0
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// 悬停在某个点上时展示的订单摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTooltip {
    pub order_id: u64,
    pub side: String,
    pub maker: String,
    pub premium: String,
    pub price: String,
    pub amount: String,
    pub payment_method: String,
    pub coordinator: String,
}

impl OrderTooltip {
    pub fn from_order(order: &Order, currency_label: &str, volume_suffix: &str) -> Self {
        Self {
            order_id: order.id,
            side: order.side.as_str().to_string(),
            maker: order.maker_nick.clone().unwrap_or_else(|| "-".to_string()),
            premium: format_premium_tick(order.premium),
            price: format!("{} {}", format_price_tick(order.price), currency_label),
            amount: format_volume_tick(order.volume(), volume_suffix),
            payment_method: order.payment_method.clone().unwrap_or_else(|| "-".to_string()),
            coordinator: order.coordinator.clone().unwrap_or_else(|| "-".to_string()),
        }
    }

    /// 多行文本形式，供绘图引擎的悬停标签使用
    pub fn to_text(&self) -> String {
        format!(
            "#{} {} · {}\n{} | {}\n{}\n{} @ {}",
            self.order_id,
            self.side,
            self.maker,
            self.premium,
            self.price,
            self.amount,
            self.payment_method,
            self.coordinator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::OrderSide;

    #[test]
    fn test_axis_formatters() {
        assert_eq!(format_price_tick(61234.7), "61235");
        assert_eq!(format_premium_tick(1.5), "1.5%");
        assert_eq!(format_premium_tick(-2.0), "-2%");
        assert_eq!(format_premium_tick(0.1 + 0.2), "0.3%");
        assert_eq!(format_volume_tick(2.0, "BTC"), "2 BTC");
        assert_eq!(format_x_tick(AxisMode::BaseAmount, 99.4), "99");
        assert_eq!(format_x_tick(AxisMode::Premium, -0.0), "0%");
    }

    #[test]
    fn test_axis_label_uses_translation() {
        let translate = |key: &str| match key {
            "Premium" => "Prima".to_string(),
            "Price" => "Precio".to_string(),
            other => other.to_string(),
        };
        assert_eq!(axis_label(AxisMode::Premium, &translate), "Prima");
        assert_eq!(axis_label(AxisMode::BaseAmount, &translate), "Precio");
    }

    #[test]
    fn test_tooltip_summary() {
        let mut order = Order::new(9, OrderSide::Buy, 58000.0, -1.25)
            .with_satoshis(25_000_000)
            .with_coordinator("alpha");
        order.maker_nick = Some("QuietOtter".to_string());

        let tooltip = OrderTooltip::from_order(&order, "USD", "BTC");
        assert_eq!(tooltip.side, "buy");
        assert_eq!(tooltip.premium, "-1.25%");
        assert_eq!(tooltip.price, "58000 USD");
        assert_eq!(tooltip.amount, "0.25 BTC");
        assert_eq!(tooltip.payment_method, "-");
        assert!(tooltip.to_text().starts_with("#9 buy · QuietOtter"));
    }
}
