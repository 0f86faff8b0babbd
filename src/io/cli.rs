//! Command-line interface: parse options, solve, print, export

use crate::engine::monitor::{NoOpMonitor, SearchMonitor};
use crate::io::configuration::{
    DEFAULT_COPIES, DEFAULT_DECK_SIZE, DEFAULT_GRID_SIZE, DEFAULT_MAX_LAYERS, DEFAULT_MAX_VALUE,
    DEFAULT_SEED,
};
use crate::io::error::{Result, WithPath};
use crate::io::image::export_solution;
use crate::io::progress::ProgressMonitor;
use crate::model::config::{ModelConfig, SearchLimits};
use crate::model::instance::PlayType;
use crate::model::solve::{SolveReport, solve_until_stopped};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "nmbr9")]
#[command(
    author,
    version,
    about = "Find the highest-scoring Nmbr9 tile stacking"
)]
/// Command-line arguments of the solver
// Independent on/off switches for symmetry, output, and progress
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Play type: free chooses the deck, known deals it at random
    #[arg(short, long, default_value_t = PlayType::Free)]
    pub play_type: PlayType,

    /// Highest tile value, 0-9
    #[arg(short, long, default_value_t = DEFAULT_MAX_VALUE)]
    pub max_value: usize,

    /// Copies of each tile value
    #[arg(short, long, default_value_t = DEFAULT_COPIES)]
    pub copies: usize,

    /// Number of cards in the deck, at most (max-value + 1) * copies
    #[arg(short, long, default_value_t = DEFAULT_DECK_SIZE)]
    pub deck_size: usize,

    /// Side length of the board
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    /// Number of stacking levels
    #[arg(short = 'l', long, default_value_t = DEFAULT_MAX_LAYERS)]
    pub max_layers: usize,

    /// Skip the copy-order and board-rotation constraints
    #[arg(long)]
    pub no_symmetry: bool,

    /// Under free play, order the levels of cards along the deck
    #[arg(long)]
    pub deck_level_symmetry: bool,

    /// Random seed of the known-deck deal
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Stop after this many seconds
    #[arg(short, long)]
    pub time_limit: Option<u64>,

    /// Stop after this many search nodes
    #[arg(short, long)]
    pub node_limit: Option<u64>,

    /// Print every improving solution, not just the best
    #[arg(short, long)]
    pub all: bool,

    /// Write level_<l>.png images of the best solution to this directory
    #[arg(short, long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Model configuration described by the arguments
    pub const fn model_config(&self) -> ModelConfig {
        ModelConfig {
            play_type: self.play_type,
            max_value: self.max_value,
            copies: self.copies,
            deck_size: self.deck_size,
            grid_size: self.grid_size,
            max_layers: self.max_layers,
            symmetry_breaking: !self.no_symmetry,
            deck_level_symmetry: self.deck_level_symmetry,
            seed: self.seed,
        }
    }

    /// Search budgets described by the arguments
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            time_limit: self.time_limit.map(Duration::from_secs),
            node_limit: self.node_limit,
        }
    }
}

/// Runs one solve for the parsed arguments and reports it
pub struct SolveRunner {
    cli: Cli,
    stop: Arc<AtomicBool>,
}

impl SolveRunner {
    /// Create a runner for the given arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops a running solve when raised from another thread
    ///
    /// The best arrangement found so far is still reported and exported.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Solve, print the result to standard output, and export images
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or output fails
    pub fn run(&self) -> Result<SolveReport> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Like [`Self::run`], printing to `out`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or output fails
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<SolveReport> {
        let config = self.cli.model_config();
        let limits = self.cli.search_limits();

        let mut monitor: Box<dyn SearchMonitor> = if self.cli.should_show_progress() {
            Box::new(ProgressMonitor::new(limits.node_limit))
        } else {
            Box::new(NoOpMonitor)
        };
        let report = solve_until_stopped(&config, &limits, &self.stop, monitor.as_mut())?;

        self.write_report(&report, out)?;

        if let (Some(directory), Some(best)) = (&self.cli.export, report.best()) {
            let written = export_solution(best, directory)?;
            // Allow print for user feedback about written files
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Wrote {} level image(s) to {}", written.len(), directory.display());
            }
        }
        Ok(report)
    }

    fn write_report<W: Write>(&self, report: &SolveReport, out: &mut W) -> Result<()> {
        let stdout_path = PathBuf::from("<stdout>");
        let write = |out: &mut W, text: String| {
            out.write_all(text.as_bytes())
                .with_path(&stdout_path, "write report")
        };

        if self.cli.all {
            for (index, solution) in report.solutions.iter().enumerate() {
                write(out, format!("Solution {}\n{solution}\n", index + 1))?;
            }
        } else if let Some(best) = report.best() {
            write(out, format!("{best}\n"))?;
        }

        let stats = &report.outcome.statistics;
        write(
            out,
            format!(
                "Result: {}\nNodes: {}, failures: {}, propagations: {}, solutions: {}\nTime: {:.3}s\n",
                report.outcome,
                stats.nodes,
                stats.failures,
                stats.propagations,
                stats.solutions,
                stats.time_total.as_secs_f64()
            ),
        )?;
        Ok(())
    }
}
