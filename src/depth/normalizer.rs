/// 订单价格归一化
///
/// 把每笔订单的价格换算到参考币种。输入快照只读，输出为新的副本。

use crate::orderbook::{coerce_currency, CurrencyCode, LimitLookup, NormalizedOrder, Order};

/// 计算单笔订单的归一化价格
///
/// 换算公式为 `price * rate / rate`，rate 取订单协调者对参考币种的参考价，
/// 查不到时取订单自身价格。公式在代数上等于 price，目前没有独立的跨币种汇率，
/// 归一化实际上是原样透传（已知限制）。
pub fn base_amount(order: &Order, currency: CurrencyCode, limits: &dyn LimitLookup) -> f64 {
    let rate = order
        .coordinator
        .as_deref()
        .and_then(|coordinator| limits.reference_price(coordinator, currency))
        .unwrap_or(order.price);

    // price和rate同时为0时避免 0/0
    if rate == 0.0 {
        return order.price;
    }
    (order.price * rate) / rate
}

/// 有协调者但该协调者没有参考币种参考价的订单数
///
/// 没有协调者的订单本来就按原价透传，不计入
pub fn missing_limit_count(
    orders: &[Order],
    currency: CurrencyCode,
    limits: &dyn LimitLookup,
) -> usize {
    let currency = coerce_currency(currency);
    orders
        .iter()
        .filter_map(|order| order.coordinator.as_deref())
        .filter(|coordinator| limits.reference_price(coordinator, currency).is_none())
        .count()
}

/// 归一化整个订单列表，输出长度与输入一致，顺序不变
pub fn normalize_orders(
    orders: &[Order],
    currency: CurrencyCode,
    limits: &dyn LimitLookup,
) -> Vec<NormalizedOrder> {
    let currency = coerce_currency(currency);

    let normalized: Vec<NormalizedOrder> = orders
        .iter()
        .map(|order| {
            let base_amount = base_amount(order, currency, limits);
            let mut copy = order.clone();
            copy.base_amount = Some(base_amount);
            NormalizedOrder {
                order: copy,
                base_amount,
            }
        })
        .collect();

    let missing_limits = missing_limit_count(orders, currency, limits);
    if missing_limits > 0 {
        log::warn!(
            "{} 笔订单的协调者缺少币种 {} 的参考价格，按原价透传",
            missing_limits,
            currency
        );
    }

    normalized
}
