//! Input/output shell around the solver
//!
//! - Command-line parsing and the solve runner
//! - Constants and defaults
//! - Error types
//! - PNG export of solution levels
//! - Terminal progress display

/// Command-line arguments and the solve runner
pub mod cli;
/// Limits, defaults, and output settings
pub mod configuration;
/// Error type and helpers
pub mod error;
/// Level image export
pub mod image;
/// Search progress display
pub mod progress;
