//! Computes every metric over a table in one pass.

use crate::config::Config;
use crate::dataset::{PluginCategory, PluginTable};
use crate::metrics::distribution::{DistributionBreakdown, DistributionFilter, distribution_patterns};
use crate::metrics::health::{EcosystemHealth, health_score};
use crate::metrics::licenses::{LicenseBreakdown, license_patterns};
use crate::metrics::versions::{VersionStats, version_patterns};
use serde::Serialize;

/// Row count for one lifecycle category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: PluginCategory,
    pub count: usize,
}

/// Every metric the reports draw from, computed once.
///
/// A pure function of the table and configuration: computing it twice over
/// the same inputs yields identical results, and an empty table produces
/// zero counts and null averages rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub total_plugins: usize,
    pub categories: Vec<CategoryCount>,
    pub distribution_all: DistributionBreakdown,
    pub distribution_active: DistributionBreakdown,
    pub versions: VersionStats,
    pub licenses: LicenseBreakdown,
    pub health: EcosystemHealth,
}

impl MetricsBundle {
    /// Compute all metrics for the table under the configured policy.
    #[must_use]
    pub fn compute(table: &PluginTable, config: &Config) -> Self {
        Self {
            total_plugins: table.len(),
            categories: table
                .category_counts()
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            distribution_all: distribution_patterns(table, DistributionFilter::All),
            distribution_active: distribution_patterns(table, DistributionFilter::ActiveOnly),
            versions: version_patterns(table, config.leaderboard_size),
            licenses: license_patterns(table),
            health: health_score(table, &config.health, config.needs_attention_size),
        }
    }
}
