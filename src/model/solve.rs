//! End-to-end solve: validate, build, break symmetry, deal, search

use crate::engine::monitor::{
    CompositeMonitor, InterruptMonitor, LogMonitor, NoOpMonitor, NodeLimitMonitor, SearchMonitor,
    TimeLimitMonitor,
};
use crate::engine::result::SearchOutcome;
use crate::engine::search::BranchAndBound;
use crate::engine::space::Space;
use crate::engine::stats::SearchStatistics;
use crate::io::error::Result;
use crate::model::board::BoardModel;
use crate::model::branching::{StackingBrancher, deal_known_deck};
use crate::model::config::{ModelConfig, SearchLimits};
use crate::model::instance::PlayType;
use crate::model::solution::Solution;
use crate::model::symmetry::post_symmetry_breaking;
use crate::spatial::catalog::TileCatalog;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{info, warn};

/// Outcome of a solve together with every improving solution in the order
/// they were found
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Best solution, its status, and search statistics
    pub outcome: SearchOutcome<Solution>,
    /// Improving solutions, worst first
    pub solutions: Vec<Solution>,
}

impl SolveReport {
    /// Best solution, if any was found
    pub const fn best(&self) -> Option<&Solution> {
        self.outcome.result.solution()
    }

    /// Score of the best solution
    pub fn best_score(&self) -> Option<i32> {
        self.best().map(|solution| solution.score)
    }
}

/// Records a snapshot of every improving solution
#[derive(Debug)]
struct SolutionCollector<'m> {
    model: &'m BoardModel,
    solutions: Vec<Solution>,
}

impl SearchMonitor for SolutionCollector<'_> {
    fn name(&self) -> &str {
        "SolutionCollector"
    }

    fn on_solution_found(&mut self, space: &Space, objective: i32, statistics: &SearchStatistics) {
        info!(
            score = objective,
            nodes = statistics.nodes,
            "improved solution"
        );
        self.solutions.push(Solution::extract(self.model, space));
    }
}

/// Solve `config` within `limits`
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is rejected.
pub fn solve(config: &ModelConfig, limits: &SearchLimits) -> Result<SolveReport> {
    solve_with_monitor(config, limits, &mut NoOpMonitor)
}

/// Solve `config` within `limits`, reporting search events to `monitor` as
/// well
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is rejected.
pub fn solve_with_monitor(
    config: &ModelConfig,
    limits: &SearchLimits,
    monitor: &mut dyn SearchMonitor,
) -> Result<SolveReport> {
    solve_until_stopped(config, limits, &Arc::new(AtomicBool::new(false)), monitor)
}

/// Solve `config` within `limits`, stopping early once `stop` is raised
///
/// The best solution found before the flag was seen is kept as a feasible
/// result.
///
/// # Errors
///
/// Returns `InvalidParameter` if the configuration is rejected.
pub fn solve_until_stopped(
    config: &ModelConfig,
    limits: &SearchLimits,
    stop: &Arc<AtomicBool>,
    monitor: &mut dyn SearchMonitor,
) -> Result<SolveReport> {
    config.validate()?;
    let catalog = TileCatalog::for_instance(&config.instance());
    let mut model = BoardModel::build(config, catalog);
    post_symmetry_breaking(&mut model, config);

    if config.play_type == PlayType::Known && deal_known_deck(&mut model, config.seed).is_err() {
        warn!(seed = config.seed, "dealt deck cannot be played");
        return Ok(SolveReport {
            outcome: SearchOutcome::infeasible(SearchStatistics::default()),
            solutions: Vec::new(),
        });
    }

    let root = model.take_space();
    let brancher = StackingBrancher::new(&model);
    let mut collector = SolutionCollector {
        model: &model,
        solutions: Vec::new(),
    };
    let mut monitors = CompositeMonitor::new();
    monitors.add_monitor(InterruptMonitor::new(Arc::clone(stop)));
    if let Some(nodes) = limits.node_limit {
        monitors.add_monitor(NodeLimitMonitor::new(nodes));
    }
    if let Some(time) = limits.time_limit {
        monitors.add_monitor(TimeLimitMonitor::with_default_check_interval(time));
    }
    monitors.add_monitor(LogMonitor::default());
    monitors.add_monitor(monitor);
    monitors.add_monitor(&mut collector);

    let outcome = BranchAndBound::new(model.score()).maximize(root, &brancher, &mut monitors);
    drop(monitors);

    let solutions = collector.solutions;
    let outcome = outcome.map(|space| Solution::extract(&model, &space));
    info!(outcome = %outcome, solutions = solutions.len(), "solve finished");
    Ok(SolveReport { outcome, solutions })
}
