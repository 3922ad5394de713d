//! Input/output operations and error handling
//!
//! This module contains the ambient concerns shared by the utilities:
//! - Command-line interface and subcommand runners
//! - Pipeline constants and defaults
//! - Error types
//! - Download progress display
//! - Report rendering and JSON output

/// Command-line interface and subcommand runners
pub mod cli;
/// Pipeline constants and runtime configuration defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Progress display for the download pass
pub mod progress;
/// Report rendering and JSON output
pub mod report;
