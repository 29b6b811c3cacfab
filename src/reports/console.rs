use super::common;
use crate::Result;
use crate::metrics::MetricsBundle;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write the short console summary shown after an analysis run.
pub fn generate<W: Write>(metrics: &MetricsBundle, use_colors: bool, writer: &mut W) -> Result<()> {
    let total = common::format_count(metrics.total_plugins);
    if use_colors {
        writeln!(writer, "Analyzed {} napari plugins", total.bold())?;
    } else {
        writeln!(writer, "Analyzed {total} napari plugins")?;
    }

    for entry in &metrics.categories {
        writeln!(
            writer,
            "  {}: {}",
            entry.category,
            common::format_count_with_percent(entry.count, metrics.total_plugins)
        )?;
    }

    writeln!(writer)?;

    let score = common::format_percent_stat(metrics.health.mean_percent);
    let colored_score = if use_colors {
        match metrics.health.mean_percent {
            Some(pct) if pct >= 70.0 => score.green().bold().to_string(),
            Some(pct) if pct >= 40.0 => score.yellow().bold().to_string(),
            Some(_) => score.red().bold().to_string(),
            None => score,
        }
    } else {
        score
    };
    writeln!(writer, "Mean health score: {colored_score}")?;
    writeln!(
        writer,
        "Plugins meeting every criterion: {}",
        common::format_count(metrics.health.perfect_count)
    )?;

    Ok(())
}
