//! CLI entry point of the Nmbr9 solver

use clap::Parser;
use nmbr9::io::cli::{Cli, SolveRunner};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> nmbr9::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();
    let report = SolveRunner::new(cli).run()?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        best = ?report.best_score(),
        "done"
    );
    Ok(())
}
