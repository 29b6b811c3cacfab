//! Command dispatch logic for plugin-pulse

use super::common::{LogLevel, init_logging};
use super::{AnalyzeArgs, InitArgs, ValidateArgs, init_config, run_analysis, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "plugin-pulse", version, author, long_about = None)]
#[command(about = "Analyze the health and sustainability of the napari plugin ecosystem")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: PulseSubcommand,
}

#[derive(Subcommand, Debug)]
enum PulseSubcommand {
    /// Build the plugin dataset and generate ecosystem reports
    Analyze(Box<AnalyzeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Parse command-line arguments and run the selected subcommand
///
/// Logging is initialized from the global `--log-level` flag before the
/// handler runs. Called from main.rs with the program arguments, and from
/// integration tests with synthetic ones.
///
/// # Errors
///
/// Returns an error when the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        PulseSubcommand::Analyze(analyze_args) => run_analysis(host, analyze_args),
        PulseSubcommand::Init(init_args) => init_config(host, init_args),
        PulseSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
