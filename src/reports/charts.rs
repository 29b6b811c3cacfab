use crate::dataset::PluginTable;
use crate::metrics::{DistributionBreakdown, MetricsBundle};
use serde::Serialize;

/// Upper bound on the number of bins in a version count histogram.
const MAX_HISTOGRAM_BINS: usize = 30;

/// Upper bound on the number of slices in the license pie.
const MAX_PIE_SLICES: usize = 10;

/// One labeled value of a bar or pie series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
}

/// A half-open bin `[lower, upper)` of per-plugin release counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub lower: usize,
    pub upper: usize,
    pub count: usize,
}

/// Chart-ready series derived from the metrics, for plotting tools to
/// consume without re-deriving anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub categories: Vec<Bar>,
    pub distribution_all: Vec<Bar>,
    pub distribution_active: Vec<Bar>,
    pub pypi_version_histogram: Vec<HistogramBin>,
    pub conda_version_histogram: Vec<HistogramBin>,
    pub license_pie: Vec<Bar>,
}

/// Assemble every chart series for the table.
#[must_use]
pub fn build(table: &PluginTable, metrics: &MetricsBundle) -> ChartData {
    ChartData {
        categories: metrics
            .categories
            .iter()
            .map(|entry| Bar {
                label: entry.category.to_string(),
                count: entry.count,
            })
            .collect(),
        distribution_all: distribution_bars(&metrics.distribution_all),
        distribution_active: distribution_bars(&metrics.distribution_active),
        pypi_version_histogram: histogram(table.records().iter().map(|record| record.pypi_versions.len())),
        conda_version_histogram: histogram(table.records().iter().map(|record| record.conda_versions.len())),
        license_pie: metrics
            .licenses
            .entries
            .iter()
            .take(MAX_PIE_SLICES)
            .map(|entry| Bar {
                label: entry.family.to_string(),
                count: entry.count,
            })
            .collect(),
    }
}

fn distribution_bars(breakdown: &DistributionBreakdown) -> Vec<Bar> {
    vec![
        Bar {
            label: "PyPI only".to_string(),
            count: breakdown.pypi_only,
        },
        Bar {
            label: "Conda-forge only".to_string(),
            count: breakdown.conda_only,
        },
        Bar {
            label: "Both PyPI and conda-forge".to_string(),
            count: breakdown.both,
        },
        Bar {
            label: "Neither".to_string(),
            count: breakdown.neither,
        },
    ]
}

/// Bin per-plugin release counts, ignoring plugins with no releases. The
/// bin width grows with the largest count so the series never exceeds
/// `MAX_HISTOGRAM_BINS` bins.
fn histogram(counts: impl Iterator<Item = usize>) -> Vec<HistogramBin> {
    let counts: Vec<usize> = counts.filter(|count| *count > 0).collect();
    let Some(max) = counts.iter().max().copied() else {
        return Vec::new();
    };

    let width = max.div_ceil(MAX_HISTOGRAM_BINS).max(1);
    let mut bins: Vec<HistogramBin> = (0..(max - 1) / width + 1)
        .map(|i| HistogramBin {
            lower: 1 + i * width,
            upper: 1 + (i + 1) * width,
            count: 0,
        })
        .collect();

    for count in counts {
        bins[(count - 1) / width].count += 1;
    }

    bins
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sources::{ClassifiersDoc, PluginSummary};

    fn table_with_pypi_counts(counts: &[(&str, usize)]) -> PluginTable {
        let summaries: Vec<PluginSummary> = counts
            .iter()
            .map(|(name, count)| PluginSummary {
                normalized_name: Some((*name).to_string()),
                pypi_versions: Some((0..*count).map(|i| format!("0.{i}.0")).collect()),
                ..PluginSummary::default()
            })
            .collect();

        PluginTable::build(&ClassifiersDoc::default(), &summaries)
    }

    #[test]
    fn histogram_bins_cover_every_count_once() {
        let table = table_with_pypi_counts(&[("one", 1), ("four", 4), ("eighty", 80)]);
        let charts = build(&table, &MetricsBundle::compute(&table, &Config::default()));

        let bins = &charts.pypi_version_histogram;
        assert_eq!(bins.len(), 27);
        assert!(bins.len() <= MAX_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|bin| bin.count).sum::<usize>(), 3);

        // Width is ceil(80 / 30) = 3, so 1 and 4 land in separate bins
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
        assert_eq!(bins[26].count, 1);
    }

    #[test]
    fn histogram_ignores_plugins_without_releases() {
        let table = table_with_pypi_counts(&[("none", 0), ("two", 2)]);
        let charts = build(&table, &MetricsBundle::compute(&table, &Config::default()));

        let bins = &charts.pypi_version_histogram;
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0], HistogramBin { lower: 1, upper: 2, count: 0 });
        assert_eq!(bins[1], HistogramBin { lower: 2, upper: 3, count: 1 });
    }

    #[test]
    fn empty_table_yields_empty_series() {
        let table = table_with_pypi_counts(&[]);
        let charts = build(&table, &MetricsBundle::compute(&table, &Config::default()));

        assert!(charts.pypi_version_histogram.is_empty());
        assert!(charts.conda_version_histogram.is_empty());
        assert!(charts.license_pie.is_empty());
        assert_eq!(charts.categories.len(), 4);
        assert!(charts.categories.iter().all(|bar| bar.count == 0));
    }

    #[test]
    fn distribution_bars_mirror_the_breakdown() {
        let table = table_with_pypi_counts(&[("one", 1), ("none", 0)]);
        let charts = build(&table, &MetricsBundle::compute(&table, &Config::default()));

        let labels: Vec<&str> = charts.distribution_all.iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, vec!["PyPI only", "Conda-forge only", "Both PyPI and conda-forge", "Neither"]);
        assert_eq!(charts.distribution_all[0].count, 1);
        assert_eq!(charts.distribution_all[3].count, 1);
    }
}
