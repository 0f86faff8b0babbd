//! Cooperative cancellation through a shared flag

use crate::engine::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::engine::stats::SearchStatistics;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Stops the search as soon as the shared flag is raised
#[derive(Debug, Clone)]
pub struct InterruptMonitor {
    stop: Arc<AtomicBool>,
}

impl InterruptMonitor {
    /// Watch `stop`
    pub const fn new(stop: Arc<AtomicBool>) -> Self {
        Self { stop }
    }

    /// Handle that raises the flag from elsewhere
    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

impl SearchMonitor for InterruptMonitor {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        if self.stop.load(Ordering::Relaxed) {
            SearchCommand::Terminate("interrupted".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
