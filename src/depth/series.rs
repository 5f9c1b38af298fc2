/// 深度图数据类型定义

use serde::Serialize;

use super::window::AxisMode;
use crate::orderbook::Order;

/// 序列名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesId {
    Buy,
    Sell,
}

impl SeriesId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesId::Buy => "buy",
            SeriesId::Sell => "sell",
        }
    }
}

/// 深度图上的一个点
///
/// 每笔订单产生两个点：x相同，第一个点（立点）y为累加前的值，第二个点（落点）y为累加后的值并携带订单。
/// 闭合到窗口边缘的合成点既不来自订单也不携带订单。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "is_false")]
    pub synthetic: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl SeriesPoint {
    /// 订单的立点
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            order: None,
            synthetic: false,
        }
    }

    /// 订单的落点
    pub fn with_order(x: f64, y: f64, order: Order) -> Self {
        Self {
            x,
            y,
            order: Some(order),
            synthetic: false,
        }
    }

    /// 闭合序列时补在窗口边缘的点
    pub fn boundary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            order: None,
            synthetic: true,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }

    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }
}

/// 一条已闭合的累计量序列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: SeriesId,
    pub data: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(id: SeriesId, data: Vec<SeriesPoint>) -> Self {
        Self { id, data }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 以 [x, y] 形式导出，供绘图引擎使用
    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.data.iter().map(|p| [p.x, p.y]).collect()
    }

    /// 序列终点的累计量
    pub fn total_volume(&self) -> f64 {
        self.data.last().map(|p| p.y).unwrap_or(0.0)
    }

    /// 找到x坐标最接近的、携带订单的点
    pub fn nearest_order(&self, x: f64) -> Option<&Order> {
        self.data
            .iter()
            .filter_map(|p| p.order.as_ref().map(|order| ((p.x - x).abs(), order)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, order)| order)
    }
}

/// 一次重算得到的完整深度图数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub mode: AxisMode,
    pub center: f64,
    pub x_range: f64,
    pub buy: Series,
    pub sell: Series,
}

impl ChartData {
    /// 可见窗口 (min_x, max_x)
    pub fn bounds(&self) -> (f64, f64) {
        (self.center - self.x_range, self.center + self.x_range)
    }

    pub fn series(&self) -> [&Series; 2] {
        [&self.buy, &self.sell]
    }

    /// 在两条序列中找到离x最近的订单
    pub fn nearest_order(&self, x: f64) -> Option<&Order> {
        let candidates = [self.buy.nearest_order(x), self.sell.nearest_order(x)];
        candidates
            .into_iter()
            .flatten()
            .min_by(|a, b| {
                let da = (self.metric_of(a) - x).abs();
                let db = (self.metric_of(b) - x).abs();
                da.total_cmp(&db)
            })
    }

    fn metric_of(&self, order: &Order) -> f64 {
        match self.mode {
            AxisMode::Premium => order.premium,
            AxisMode::BaseAmount => order.base_amount.unwrap_or(order.price),
        }
    }
}
