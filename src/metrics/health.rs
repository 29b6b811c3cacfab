//! Per-plugin and ecosystem-wide health scoring.

use crate::config::HealthWeights;
use crate::dataset::{PluginRecord, PluginTable};
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The boolean criteria a plugin is scored on.
///
/// Each criterion's contribution to the score comes from the
/// [`HealthWeights`] policy, so what "healthy" means is visible in the
/// configuration rather than baked into the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum HealthCriterion {
    #[strum(serialize = "Declares a license")]
    HasLicense,

    #[strum(serialize = "Links a homepage")]
    HasHomepage,

    #[strum(serialize = "Publishes project URLs")]
    HasProjectUrls,

    #[strum(serialize = "Available on conda-forge")]
    OnConda,

    #[strum(serialize = "Depends on a test framework")]
    HasTestDependency,

    #[strum(serialize = "Declares a Python requirement")]
    DeclaresPythonRequires,

    #[strum(serialize = "Leaves napari unpinned")]
    UnconstrainedNapariPin,
}

impl HealthCriterion {
    /// Whether the record satisfies this criterion.
    #[must_use]
    pub fn passes(self, record: &PluginRecord) -> bool {
        match self {
            Self::HasLicense => record.has_license(),
            Self::HasHomepage => record.has_homepage(),
            Self::HasProjectUrls => record.has_project_urls(),
            Self::OnConda => record.on_conda(),
            Self::HasTestDependency => record.has_test_dependency(),
            Self::DeclaresPythonRequires => record.declares_python_requires(),
            Self::UnconstrainedNapariPin => record.unconstrained_napari_pin(),
        }
    }

    /// This criterion's weight under the given policy.
    #[must_use]
    pub const fn weight(self, weights: &HealthWeights) -> f64 {
        match self {
            Self::HasLicense => weights.has_license,
            Self::HasHomepage => weights.has_homepage,
            Self::HasProjectUrls => weights.has_project_urls,
            Self::OnConda => weights.has_conda,
            Self::HasTestDependency => weights.has_test_dependency,
            Self::DeclaresPythonRequires => weights.declares_python_requires,
            Self::UnconstrainedNapariPin => weights.unconstrained_napari_pin,
        }
    }
}

impl Serialize for HealthCriterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How many plugins pass one criterion, and what it's worth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionStat {
    pub criterion: HealthCriterion,
    pub passing: usize,
    pub weight: f64,
}

/// A plugin's health score, 0 to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginHealth {
    pub name: String,
    pub score: f64,
}

/// Health scoring results for the whole table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcosystemHealth {
    pub plugin_count: usize,

    /// Mean plugin score as a percentage, `None` for an empty table.
    pub mean_percent: Option<f64>,

    /// Plugins that satisfy every criterion.
    pub perfect_count: usize,

    /// Pass counts per criterion, across the whole table.
    pub criteria: Vec<CriterionStat>,

    /// The lowest-scoring active plugins, worst first.
    pub needs_attention: Vec<PluginHealth>,
}

/// Score a single plugin: the weighted fraction of criteria it satisfies.
///
/// Returns 0 when the policy's weights sum to zero or less, since no
/// meaningful fraction exists.
#[must_use]
pub fn plugin_score(record: &PluginRecord, weights: &HealthWeights) -> f64 {
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }

    let earned: f64 = HealthCriterion::iter()
        .filter(|criterion| criterion.passes(record))
        .map(|criterion| criterion.weight(weights))
        .sum();

    (earned / total).clamp(0.0, 1.0)
}

/// Score every plugin and aggregate the results.
///
/// `attention_size` caps the needs-attention list, which only considers
/// active plugins since withdrawn and deleted ones aren't maintained.
#[expect(clippy::cast_precision_loss, reason = "plugin counts are far below 2^52")]
#[must_use]
pub fn health_score(table: &PluginTable, weights: &HealthWeights, attention_size: usize) -> EcosystemHealth {
    let scores: Vec<f64> = table.records().iter().map(|record| plugin_score(record, weights)).collect();

    let mean_percent = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64 * 100.0)
    };

    let perfect_count = scores.iter().filter(|score| **score >= 1.0 - 1e-9).count();

    let criteria = HealthCriterion::iter()
        .map(|criterion| CriterionStat {
            criterion,
            passing: table.records().iter().filter(|record| criterion.passes(record)).count(),
            weight: criterion.weight(weights),
        })
        .collect();

    let mut needs_attention: Vec<PluginHealth> = table
        .active()
        .map(|record| PluginHealth {
            name: record.name.clone(),
            score: plugin_score(record, weights),
        })
        .collect();
    needs_attention.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.name.cmp(&b.name)));
    needs_attention.truncate(attention_size);

    EcosystemHealth {
        plugin_count: table.len(),
        mean_percent,
        perfect_count,
        criteria,
        needs_attention,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::sources::{ClassifiersDoc, PluginSummary};

    fn perfect_summary(name: &str) -> PluginSummary {
        PluginSummary {
            normalized_name: Some(name.to_string()),
            license: Some("MIT".to_string()),
            home_page: Some("https://example.com".to_string()),
            project_urls: Some(vec!["https://github.com/acme/x".to_string()]),
            pypi_versions: Some(vec!["0.1.0".to_string()]),
            conda_versions: Some(vec!["0.1.0".to_string()]),
            python_requires: Some(">=3.9".to_string()),
            napari_pin_type: Some(">=0.4.12".to_string()),
            requires_dist: Some(vec!["pytest".to_string()]),
            ..PluginSummary::default()
        }
    }

    fn hollow_summary(name: &str) -> PluginSummary {
        // Fails every criterion, including the napari pin
        PluginSummary {
            normalized_name: Some(name.to_string()),
            napari_pin_type: Some("==0.4.17".to_string()),
            ..PluginSummary::default()
        }
    }

    fn build(summaries: Vec<PluginSummary>, active: &[&str]) -> PluginTable {
        let mut classifiers = ClassifiersDoc::default();
        for name in active {
            _ = classifiers.active.insert((*name).to_string(), Vec::new());
        }

        PluginTable::build(&classifiers, &summaries)
    }

    #[test]
    fn perfect_record_scores_one() {
        let table = build(vec![perfect_summary("alpha")], &[]);
        let score = plugin_score(&table.records()[0], &HealthWeights::default());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hollow_record_scores_zero() {
        let table = build(vec![hollow_summary("alpha")], &[]);
        let score = plugin_score(&table.records()[0], &HealthWeights::default());
        assert!(score.abs() < 1e-9);
    }

    #[test]
    fn bare_record_earns_only_the_unpinned_criterion() {
        // A classification-only row has no pin at all, which counts as
        // unconstrained, so it earns exactly one of seven uniform weights.
        let table = build(vec![], &["alpha"]);
        let score = plugin_score(&table.records()[0], &HealthWeights::default());
        assert!((score - 1.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn zero_weights_score_zero_without_panicking() {
        let weights = HealthWeights {
            has_license: 0.0,
            has_homepage: 0.0,
            has_project_urls: 0.0,
            has_conda: 0.0,
            has_test_dependency: 0.0,
            declares_python_requires: 0.0,
            unconstrained_napari_pin: 0.0,
        };

        let table = build(vec![perfect_summary("alpha")], &[]);
        assert!(plugin_score(&table.records()[0], &weights).abs() < 1e-9);
    }

    #[test]
    fn zeroed_criterion_stops_counting() {
        let mut summary = perfect_summary("alpha");
        summary.conda_versions = Some(Vec::new());

        let weights = HealthWeights {
            has_conda: 0.0,
            ..HealthWeights::default()
        };

        let table = build(vec![summary], &[]);
        let score = plugin_score(&table.records()[0], &weights);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ecosystem_mean_is_a_percentage() {
        let table = build(vec![perfect_summary("alpha"), hollow_summary("beta")], &[]);

        let health = health_score(&table, &HealthWeights::default(), 5);
        assert_eq!(health.plugin_count, 2);
        assert!((health.mean_percent.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(health.perfect_count, 1);
    }

    #[test]
    fn empty_table_yields_null_mean() {
        let table = build(vec![], &[]);

        let health = health_score(&table, &HealthWeights::default(), 5);
        assert_eq!(health.plugin_count, 0);
        assert_eq!(health.mean_percent, None);
        assert_eq!(health.perfect_count, 0);
        assert!(health.needs_attention.is_empty());
        assert!(health.criteria.iter().all(|stat| stat.passing == 0));
    }

    #[test]
    fn criteria_stats_count_passing_rows() {
        let table = build(vec![perfect_summary("alpha"), hollow_summary("beta")], &[]);

        let health = health_score(&table, &HealthWeights::default(), 5);
        for stat in &health.criteria {
            assert_eq!(stat.passing, 1, "criterion: {}", stat.criterion);
            assert!((stat.weight - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn needs_attention_lists_worst_active_plugins() {
        let table = build(
            vec![
                perfect_summary("healthy"),
                hollow_summary("sickly"),
                hollow_summary("ailing"),
                hollow_summary("ignored-unclassified"),
            ],
            &["healthy", "sickly", "ailing"],
        );

        let health = health_score(&table, &HealthWeights::default(), 2);
        let names: Vec<&str> = health.needs_attention.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ailing", "sickly"]);
    }
}
