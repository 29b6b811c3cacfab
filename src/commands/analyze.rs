use super::Host;
use super::common::{ColorMode, resolve_cache_dir};
use crate::Result;
use crate::config::Config;
use crate::dataset::PluginTable;
use crate::metrics::MetricsBundle;
use crate::reports::{self, ChartData};
use crate::sources::{Cache, Fetcher, classifiers, summaries};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "    analyze";

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Directory where the report files are written
    #[arg(long, default_value = "reports", value_name = "PATH")]
    pub output_dir: Utf8PathBuf,

    /// Path to configuration file [default: one of pulse.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where snapshots are cached [default: the platform cache directory]
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Ignore cached snapshots and fetch fresh copies
    #[arg(long)]
    pub refresh: bool,

    /// Use cached snapshots only, never touch the network
    #[arg(long, conflicts_with = "refresh")]
    pub offline: bool,

    /// Embed the generation timestamp in report filenames
    #[arg(long)]
    pub timestamped: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

/// Build the plugin dataset from the npe2api snapshots, compute the ecosystem
/// metrics, and write the report files.
pub fn run_analysis<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    let now = Utc::now();

    let (config, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    if !warnings.is_empty() {
        let _ = writeln!(host.error(), "\n⚠️  Configuration validation warnings:");
        for warning in &warnings {
            let _ = writeln!(host.error(), "   {warning}");
        }
        let _ = writeln!(host.error());
    }

    let cache_dir = resolve_cache_dir(args.cache_dir.as_ref())?;
    let cache = Cache::new(
        cache_dir,
        Duration::from_secs(config.snapshot_cache_ttl * 24 * 60 * 60),
        now,
        args.refresh,
    );
    let fetcher = Fetcher::new(Duration::from_secs(config.fetch_timeout), args.offline)?;

    let classifiers = classifiers::load(&cache, &fetcher, &config.classifiers_url)?;
    let summaries = summaries::load(&cache, &fetcher, &config.summaries_url)?;

    let table = PluginTable::build(&classifiers, &summaries);
    if table.is_empty() {
        log::warn!(target: LOG_TARGET, "No plugins found in either snapshot, reports will be empty");
    }

    let metrics = MetricsBundle::compute(&table, &config);
    let charts = reports::build_charts(&table, &metrics);

    let written = write_reports(&table, &metrics, &charts, &args.output_dir, args.timestamped, now)?;

    let without_github = table.records().iter().filter(|r| r.github_url.is_none()).count();
    log::info!(target: LOG_TARGET, "{without_github} of {} plugins have no GitHub repository URL", table.len());

    let use_colors = match args.color {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            use std::io::{IsTerminal, stdout};
            stdout().is_terminal()
        }
    };

    let mut console_output = String::new();
    _ = reports::generate_console(&metrics, use_colors, &mut console_output);
    let _ = write!(host.output(), "{console_output}");

    let _ = writeln!(host.output());
    let _ = writeln!(host.output(), "Reports written to {}:", args.output_dir);
    for path in &written {
        let _ = writeln!(host.output(), "  {path}");
    }

    Ok(())
}

fn write_reports(
    table: &PluginTable,
    metrics: &MetricsBundle,
    charts: &ChartData,
    output_dir: &Utf8Path,
    timestamped: bool,
    now: DateTime<Utc>,
) -> Result<Vec<Utf8PathBuf>> {
    fs::create_dir_all(output_dir).into_app_err_with(|| format!("creating report directory {output_dir}"))?;

    let mut text = String::new();
    reports::generate_text(metrics, now, &mut text)?;

    let mut json = String::new();
    reports::generate_json(metrics, charts, now, &mut json)?;

    let mut repos = String::new();
    reports::generate_repos_csv(table, &mut repos)?;

    let mut written = Vec::new();
    for (stem, extension, contents) in [
        ("ecosystem_report", "md", text),
        ("ecosystem_report", "json", json),
        ("github_repos", "csv", repos),
    ] {
        let path = output_dir.join(report_filename(stem, extension, timestamped, now));
        fs::write(&path, contents).into_app_err_with(|| format!("writing report to {path}"))?;
        written.push(path);
    }

    Ok(written)
}

fn report_filename(stem: &str, extension: &str, timestamped: bool, now: DateTime<Utc>) -> String {
    if timestamped {
        format!("{stem}_{}.{extension}", now.format("%Y%m%d_%H%M%S"))
    } else {
        format!("{stem}.{extension}")
    }
}
