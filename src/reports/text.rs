use super::common;
use crate::Result;
use crate::metrics::{ChannelVersionStats, DistributionBreakdown, MetricsBundle};
use chrono::{DateTime, Utc};
use core::fmt::Write;

/// Render the Markdown ecosystem report.
///
/// Apart from the stamped generation time, the output is a pure function of
/// the metrics: rendering the same bundle twice produces byte-identical
/// text.
pub fn generate<W: Write>(metrics: &MetricsBundle, generated: DateTime<Utc>, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Napari Plugin Ecosystem Analysis Report")?;
    writeln!(writer)?;
    writeln!(writer, "Generated: {}", generated.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer)?;

    writeln!(writer, "## Executive Summary")?;
    writeln!(writer)?;
    writeln!(writer, "- Total plugins tracked: {}", common::format_count(metrics.total_plugins))?;
    for entry in &metrics.categories {
        writeln!(
            writer,
            "- {} plugins: {}",
            entry.category,
            common::format_count_with_percent(entry.count, metrics.total_plugins)
        )?;
    }
    writeln!(writer, "- Mean health score: {}", common::format_percent_stat(metrics.health.mean_percent))?;
    writeln!(writer)?;

    writeln!(writer, "## Distribution Patterns")?;
    writeln!(writer)?;
    writeln!(writer, "### All Plugins")?;
    writeln!(writer)?;
    write_distribution(&metrics.distribution_all, writer)?;
    writeln!(writer)?;
    writeln!(writer, "### Active Plugins Only")?;
    writeln!(writer)?;
    write_distribution(&metrics.distribution_active, writer)?;
    writeln!(writer)?;

    writeln!(writer, "## Version Release Patterns")?;
    writeln!(writer)?;
    writeln!(writer, "### PyPI")?;
    writeln!(writer)?;
    write_channel_stats(&metrics.versions.pypi, writer)?;
    writeln!(writer)?;
    writeln!(writer, "### conda-forge")?;
    writeln!(writer)?;
    write_channel_stats(&metrics.versions.conda, writer)?;
    writeln!(writer)?;

    let specified = metrics.licenses.specified();
    writeln!(writer, "## License Analysis")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "- Plugins with a declared license: {}",
        common::format_count_with_percent(specified, metrics.licenses.total)
    )?;
    writeln!(
        writer,
        "- Plugins without a declared license: {}",
        common::format_count_with_percent(metrics.licenses.total - specified, metrics.licenses.total)
    )?;
    if let Some(top) = metrics.licenses.entries.first() {
        writeln!(writer, "- Most common license: {}", top.family)?;
    }
    writeln!(writer)?;
    writeln!(writer, "### License Distribution")?;
    writeln!(writer)?;
    for entry in &metrics.licenses.entries {
        writeln!(
            writer,
            "- {}: {} ({:.1}%)",
            entry.family,
            common::format_count(entry.count),
            entry.percent
        )?;
    }
    writeln!(writer)?;

    writeln!(writer, "## Ecosystem Health")?;
    writeln!(writer)?;
    writeln!(writer, "- Mean health score: {}", common::format_percent_stat(metrics.health.mean_percent))?;
    writeln!(
        writer,
        "- Plugins meeting every criterion: {}",
        common::format_count(metrics.health.perfect_count)
    )?;
    for stat in &metrics.health.criteria {
        writeln!(
            writer,
            "- {}: {}",
            stat.criterion,
            common::format_count_with_percent(stat.passing, metrics.health.plugin_count)
        )?;
    }
    if !metrics.health.needs_attention.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Active plugins needing attention:")?;
        writeln!(writer)?;
        for (rank, plugin) in metrics.health.needs_attention.iter().enumerate() {
            writeln!(writer, "{}. {}: {:.1}%", rank + 1, plugin.name, plugin.score * 100.0)?;
        }
    }
    writeln!(writer)?;

    let active = &metrics.distribution_active;
    writeln!(writer, "## Key Findings")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "- Distribution coverage: {:.1}% of active plugins are available on PyPI",
        common::percent_of(active.pypi_only + active.both, active.total)
    )?;
    writeln!(
        writer,
        "- Conda-forge adoption: {:.1}% of active plugins are available on conda-forge",
        common::percent_of(active.on_conda(), active.total)
    )?;
    writeln!(
        writer,
        "- License compliance: {:.1}% of plugins declare a license",
        common::percent_of(specified, metrics.licenses.total)
    )?;
    writeln!(writer)?;

    writeln!(writer, "## Recommendations")?;
    writeln!(writer)?;
    writeln!(writer, "1. Encourage conda-forge packaging for PyPI-only plugins to improve accessibility")?;
    writeln!(writer, "2. Help unlicensed plugins adopt appropriate open source licenses")?;
    writeln!(writer, "3. Monitor plugins with low version counts for potential maintenance issues")?;
    writeln!(writer, "4. Focus sustainability efforts on plugins with high version counts (active development)")?;

    Ok(())
}

fn write_distribution<W: Write>(breakdown: &DistributionBreakdown, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "- PyPI only: {}",
        common::format_count_with_percent(breakdown.pypi_only, breakdown.total)
    )?;
    writeln!(
        writer,
        "- Conda-forge only: {}",
        common::format_count_with_percent(breakdown.conda_only, breakdown.total)
    )?;
    writeln!(
        writer,
        "- Both PyPI and conda-forge: {}",
        common::format_count_with_percent(breakdown.both, breakdown.total)
    )?;
    writeln!(
        writer,
        "- Neither: {}",
        common::format_count_with_percent(breakdown.neither, breakdown.total)
    )?;
    Ok(())
}

fn write_channel_stats<W: Write>(stats: &ChannelVersionStats, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "- Plugins with at least one release: {}",
        common::format_count(stats.plugins_with_releases)
    )?;
    writeln!(
        writer,
        "- Plugins with no releases: {}",
        common::format_count(stats.plugins_without_releases)
    )?;
    writeln!(writer, "- Average versions per plugin: {}", common::format_stat(stats.mean, 1))?;
    writeln!(writer, "- Median versions per plugin: {}", common::format_stat(stats.median, 0))?;
    writeln!(
        writer,
        "- Maximum versions: {}",
        stats.max.map_or_else(|| "n/a".to_string(), common::format_count)
    )?;

    if !stats.top.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Most released plugins:")?;
        writeln!(writer)?;
        for (rank, entry) in stats.top.iter().enumerate() {
            writeln!(writer, "{}. {}: {} versions", rank + 1, entry.name, common::format_count(entry.count))?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::PluginTable;
    use crate::sources::{ClassifiersDoc, PluginSummary};
    use chrono::TimeZone;

    fn test_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn release_heavy_table() -> PluginTable {
        let mut classifiers = ClassifiersDoc::default();
        let summaries: Vec<PluginSummary> = [("one", 1usize), ("four", 4), ("eighty", 80)]
            .iter()
            .map(|(name, count)| {
                _ = classifiers.active.insert((*name).to_string(), Vec::new());
                PluginSummary {
                    normalized_name: Some((*name).to_string()),
                    license: Some("MIT".to_string()),
                    pypi_versions: Some((0..*count).map(|i| format!("0.{i}.0")).collect()),
                    ..PluginSummary::default()
                }
            })
            .collect();

        PluginTable::build(&classifiers, &summaries)
    }

    fn render(table: &PluginTable) -> String {
        let metrics = MetricsBundle::compute(table, &Config::default());
        let mut output = String::new();
        generate(&metrics, test_timestamp(), &mut output).unwrap();
        output
    }

    #[test]
    fn report_carries_all_fixed_headers() {
        let output = render(&release_heavy_table());

        for header in [
            "# Napari Plugin Ecosystem Analysis Report",
            "## Executive Summary",
            "## Distribution Patterns",
            "### All Plugins",
            "### Active Plugins Only",
            "## Version Release Patterns",
            "## License Analysis",
            "### License Distribution",
            "## Ecosystem Health",
            "## Key Findings",
            "## Recommendations",
        ] {
            assert!(output.contains(header), "missing header: {header}");
        }
    }

    #[test]
    fn timestamp_is_stamped_verbatim() {
        let output = render(&release_heavy_table());
        assert!(output.contains("Generated: 2024-01-15 10:30:00 UTC"));
    }

    #[test]
    fn release_statistics_match_the_table() {
        let output = render(&release_heavy_table());

        assert!(output.contains("- Average versions per plugin: 28.3"));
        assert!(output.contains("- Median versions per plugin: 4"));
        assert!(output.contains("- Maximum versions: 80"));
        assert!(output.contains("- PyPI only: 3 (100.0%)"));
        assert!(output.contains("1. eighty: 80 versions"));
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let table = release_heavy_table();
        assert_eq!(render(&table), render(&table));
    }

    #[test]
    fn empty_table_renders_without_error() {
        let table = PluginTable::build(&ClassifiersDoc::default(), &[]);
        let output = render(&table);

        assert!(output.contains("- Total plugins tracked: 0"));
        assert!(output.contains("- Mean health score: n/a"));
        assert!(output.contains("- Average versions per plugin: n/a"));
        assert!(output.contains("- Maximum versions: n/a"));
        assert!(!output.contains("Most released plugins:"));
        assert!(!output.contains("needing attention:"));
    }

    #[test]
    fn license_share_of_a_half_mit_table() {
        let mut classifiers = ClassifiersDoc::default();
        _ = classifiers.active.insert("licensed".to_string(), Vec::new());
        _ = classifiers.active.insert("unlicensed".to_string(), Vec::new());

        let summaries = vec![PluginSummary {
            normalized_name: Some("licensed".to_string()),
            license: Some("MIT".to_string()),
            ..PluginSummary::default()
        }];

        let output = render(&PluginTable::build(&classifiers, &summaries));
        assert!(output.contains("- MIT: 1 (50.0%)"));
        assert!(output.contains("- Unspecified: 1 (50.0%)"));
        assert!(output.contains("- License compliance: 50.0% of plugins declare a license"));
    }
}
