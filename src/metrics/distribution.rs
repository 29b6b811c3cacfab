//! Distribution channel breakdown: where plugins can be installed from.

use crate::dataset::{PluginCategory, PluginTable};
use serde::Serialize;

/// Which rows of the table a breakdown covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionFilter {
    All,
    ActiveOnly,
}

/// Counts of plugins per distribution channel combination.
///
/// The four buckets are disjoint and exhaustive: every counted plugin lands
/// in exactly one, so they always sum to `total`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionBreakdown {
    pub total: usize,
    pub pypi_only: usize,
    pub conda_only: usize,
    pub both: usize,
    pub neither: usize,
}

impl DistributionBreakdown {
    /// Plugins installable from at least one channel.
    #[must_use]
    pub const fn distributed(&self) -> usize {
        self.pypi_only + self.conda_only + self.both
    }

    /// Plugins installable from conda-forge.
    #[must_use]
    pub const fn on_conda(&self) -> usize {
        self.conda_only + self.both
    }
}

/// Bucket the table's rows by distribution channel.
#[must_use]
pub fn distribution_patterns(table: &PluginTable, filter: DistributionFilter) -> DistributionBreakdown {
    let mut breakdown = DistributionBreakdown::default();

    for record in table.records() {
        if filter == DistributionFilter::ActiveOnly && record.category != PluginCategory::Active {
            continue;
        }

        breakdown.total += 1;
        match (record.on_pypi(), record.on_conda()) {
            (true, false) => breakdown.pypi_only += 1,
            (false, true) => breakdown.conda_only += 1,
            (true, true) => breakdown.both += 1,
            (false, false) => breakdown.neither += 1,
        }
    }

    breakdown
}
