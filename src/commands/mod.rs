//! Command-line interface and orchestration for plugin-pulse
//!
//! This module implements the CLI commands and coordinates all the other
//! modules to perform end-to-end dataset construction, metric computation,
//! and reporting. It handles argument parsing, configuration management,
//! and the high-level workflows.
//!
//! # Implementation Model
//!
//! The module is organized around three commands:
//!
//! ## Commands
//!
//! - **analyze**: Load the npe2api snapshots, join them into the plugin
//!   table, compute every metric group, and write the report files
//! - **init**: Generate a default configuration file with commented settings
//! - **validate**: Check configuration file syntax and report suspicious values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. The analyze command follows this
//! pattern:
//!
//! 1. Parse arguments and load configuration
//! 2. Load the two snapshots through the cache, fetching on a miss
//! 3. Join them into the plugin table
//! 4. Compute the metric groups over the table
//! 5. Generate the text, JSON, and CSV reports plus the console summary
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, and cache directory resolution. All terminal I/O
//! goes through the [`Host`] trait so the commands stay testable.

mod analyze;
mod common;
mod host;
mod init;
mod run;
mod validate;

pub use analyze::{AnalyzeArgs, run_analysis};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
