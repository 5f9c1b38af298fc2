pub mod data_structures;
pub mod limits;
pub mod serde_util;
pub mod snapshot;

pub use data_structures::*;
pub use limits::{CoordinatorLimits, Limit, LimitList, LimitLookup};
pub use snapshot::{load_limits, load_orders, parse_limits, parse_orders, SnapshotError};
