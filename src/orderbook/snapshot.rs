/// 订单簿与限额快照的加载
///
/// 核心计算不会失败，只有从文件读取快照这一层会返回错误

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data_structures::Order;
use super::limits::CoordinatorLimits;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 解析订单簿快照（JSON数组）
///
/// 整体不是数组时报错；单笔订单无法解析时跳过该订单
pub fn parse_orders(content: &str) -> Result<Vec<Order>, SnapshotError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(content)?;
    let total = entries.len();

    let orders: Vec<Order> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(order) => Some(order),
            Err(e) => {
                log::warn!("跳过第 {} 笔无法解析的订单: {}", index, e);
                None
            }
        })
        .collect();

    log::debug!("解析订单簿快照: {}/{} 笔订单", orders.len(), total);
    Ok(orders)
}

/// 解析协调者限额快照
pub fn parse_limits(content: &str) -> Result<CoordinatorLimits, SnapshotError> {
    let limits: CoordinatorLimits = serde_json::from_str(content)?;
    log::debug!("解析限额快照: {} 个协调者", limits.coordinator_count());
    Ok(limits)
}

pub fn load_orders<P: AsRef<Path>>(path: P) -> Result<Vec<Order>, SnapshotError> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_orders(&content)
}

pub fn load_limits<P: AsRef<Path>>(path: P) -> Result<CoordinatorLimits, SnapshotError> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_limits(&content)
}
