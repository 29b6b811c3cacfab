//! Report generation for the ecosystem analysis.
//!
//! Four outputs are produced from the same [`MetricsBundle`](crate::metrics::MetricsBundle):
//! - **Text**: the Markdown ecosystem report for human readers
//! - **JSON**: the metrics and chart-ready series for programmatic use
//! - **Repos**: a CSV inventory of plugin GitHub repositories
//! - **Console**: the short colored summary printed after a run
//!
//! Every generator writes through `fmt::Write` so callers decide where the
//! bytes go, and all of them are deterministic: the only run-dependent value
//! is the generation timestamp the caller passes in.

mod charts;
mod common;
mod console;
mod json;
mod repos;
mod text;

pub use charts::{Bar, ChartData, HistogramBin, build as build_charts};
pub use console::generate as generate_console;
pub use json::generate as generate_json;
pub use repos::generate as generate_repos_csv;
pub use text::generate as generate_text;
