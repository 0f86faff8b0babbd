//! Terminal progress display for a running search

use crate::engine::monitor::SearchMonitor;
use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;
use crate::io::configuration::PROGRESS_REFRESH_NODES;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} [{elapsed_precise}] {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BUDGET_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows nodes, failures, and the best score while the search runs
///
/// With a node budget the display is a bar filling up to the budget,
/// otherwise a spinner.
pub struct ProgressMonitor {
    bar: ProgressBar,
    best: Option<i32>,
}

impl ProgressMonitor {
    /// Create the display, as a bar when `node_limit` is known
    pub fn new(node_limit: Option<u64>) -> Self {
        let bar = node_limit.map_or_else(
            || {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(SPINNER_STYLE.clone());
                spinner.enable_steady_tick(Duration::from_millis(120));
                spinner
            },
            |limit| ProgressBar::new(limit).with_style(BUDGET_STYLE.clone()),
        );
        bar.set_prefix("nmbr9");
        Self { bar, best: None }
    }

    /// Display that draws nothing, for tests and quiet runs
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            best: None,
        }
    }

    /// Best score shown so far
    pub const fn best(&self) -> Option<i32> {
        self.best
    }

    fn refresh(&self, statistics: &SearchStatistics) {
        self.bar.set_position(statistics.nodes);
        let best = self
            .best
            .map_or_else(|| "-".to_owned(), |score| score.to_string());
        self.bar.set_message(format!(
            "nodes {} | failures {} | best {best}",
            statistics.nodes, statistics.failures
        ));
    }
}

impl SearchMonitor for ProgressMonitor {
    fn name(&self) -> &str {
        "ProgressMonitor"
    }

    fn on_node(&mut self, statistics: &SearchStatistics) {
        if statistics.nodes % PROGRESS_REFRESH_NODES == 0 {
            self.refresh(statistics);
        }
    }

    fn on_solution_found(&mut self, _space: &Space, objective: i32, statistics: &SearchStatistics) {
        self.best = Some(objective);
        self.refresh(statistics);
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        self.refresh(statistics);
        self.bar.finish_and_clear();
    }
}
