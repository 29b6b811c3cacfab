//! Sustainability metrics computed over the joined plugin dataset.
//!
//! All of these are pure functions: they never mutate the table, and an
//! empty table produces zero counts and null averages, never an error.

mod bundle;
mod distribution;
mod health;
mod licenses;
mod versions;

pub use bundle::{CategoryCount, MetricsBundle};
pub use distribution::{DistributionBreakdown, DistributionFilter, distribution_patterns};
pub use health::{CriterionStat, EcosystemHealth, HealthCriterion, PluginHealth, health_score, plugin_score};
pub use licenses::{LicenseBreakdown, LicenseEntry, LicenseFamily, license_patterns};
pub use versions::{ChannelVersionStats, LeaderboardEntry, VersionStats, version_patterns};
