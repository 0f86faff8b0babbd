//! Search monitors: observation, limits, and cancellation

/// Fan-out to several monitors
pub mod composite;
/// External stop flag
pub mod interrupt;
/// Time and node budgets
pub mod limits;
/// Tracing output
pub mod log;
/// Monitor trait and the no-op monitor
pub mod search_monitor;

pub use composite::CompositeMonitor;
pub use interrupt::InterruptMonitor;
pub use limits::{NodeLimitMonitor, TimeLimitMonitor};
pub use log::LogMonitor;
pub use search_monitor::{NoOpMonitor, SearchCommand, SearchMonitor};
