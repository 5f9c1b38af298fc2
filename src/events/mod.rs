pub mod dispatcher;
pub mod event_types;

pub use dispatcher::{ChangeDispatcher, DispatcherStats, RecomputeTarget};
pub use event_types::{Event, EventType, InputSignal, RecomputeStage};
