//! Joins the two snapshots into a single plugin table.

use crate::dataset::record::{PluginCategory, PluginRecord, extract_github_url};
use crate::sources::{ClassifiersDoc, PluginSummary};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "    dataset";

/// The joined plugin dataset, one row per plugin name.
///
/// Built as a full outer join of the classification and metadata snapshots:
/// every plugin named by either source gets a row, and fields the other
/// source would have supplied default to empty. Rows are ordered by name so
/// downstream output is deterministic.
#[derive(Debug, Clone)]
pub struct PluginTable {
    records: Vec<PluginRecord>,
}

impl PluginTable {
    /// Join the two snapshots.
    ///
    /// The join is total: malformed documents are rejected upstream when
    /// they're deserialized, and per-row gaps are absorbed here by
    /// defaulting the missing side. Conflicts (a plugin classified under
    /// two categories, or described by two metadata records) keep the
    /// first occurrence and log a warning.
    #[must_use]
    pub fn build(classifiers: &ClassifiersDoc, summaries: &[PluginSummary]) -> Self {
        let mut classification: BTreeMap<&str, (PluginCategory, &Vec<String>)> = BTreeMap::new();
        for (category, entries) in [
            (PluginCategory::Active, &classifiers.active),
            (PluginCategory::Withdrawn, &classifiers.withdrawn),
            (PluginCategory::Deleted, &classifiers.deleted),
        ] {
            for (name, versions) in entries {
                match classification.entry(name.as_str()) {
                    Entry::Vacant(entry) => {
                        _ = entry.insert((category, versions));
                    }
                    Entry::Occupied(entry) => {
                        let (kept, _) = entry.get();
                        log::warn!(
                            target: LOG_TARGET,
                            "Plugin '{name}' is classified as both {kept} and {category}, keeping {kept}"
                        );
                    }
                }
            }
        }

        let mut summary_index: BTreeMap<&str, &PluginSummary> = BTreeMap::new();
        let mut nameless = 0usize;
        for summary in summaries {
            let Some(key) = summary.key() else {
                nameless += 1;
                continue;
            };

            match summary_index.entry(key) {
                Entry::Vacant(entry) => {
                    _ = entry.insert(summary);
                }
                Entry::Occupied(_) => {
                    log::warn!(target: LOG_TARGET, "Duplicate metadata record for plugin '{key}', keeping the first");
                }
            }
        }

        if nameless > 0 {
            log::warn!(target: LOG_TARGET, "Ignoring {nameless} metadata records that carry no plugin name");
        }

        let names: BTreeSet<&str> = classification.keys().chain(summary_index.keys()).copied().collect();

        let mut records = Vec::with_capacity(names.len());
        for name in names {
            let (category, classifier_versions) = match classification.get(name) {
                Some((category, versions)) => (*category, (*versions).clone()),
                None => (PluginCategory::Unclassified, Vec::new()),
            };

            let record = match summary_index.get(name) {
                Some(summary) => {
                    let project_urls = summary.project_urls.clone().unwrap_or_default();
                    let home_page = summary.home_page.clone();
                    let github_url = extract_github_url(&project_urls, home_page.as_deref());

                    PluginRecord {
                        name: name.to_string(),
                        category,
                        classifier_versions,
                        display_name: summary.display_name.clone().unwrap_or_else(|| name.to_string()),
                        summary: summary.summary.clone(),
                        author: summary.author.clone(),
                        license: summary.license.clone(),
                        home_page,
                        project_urls,
                        pypi_versions: summary.pypi_versions.clone().unwrap_or_default(),
                        conda_versions: summary.conda_versions.clone().unwrap_or_default(),
                        python_requires: summary.python_requires.clone(),
                        napari_pin_type: summary.napari_pin_type.clone(),
                        requires_dist: summary.requires_dist.clone().unwrap_or_default(),
                        github_url,
                    }
                }
                None => {
                    log::debug!(target: LOG_TARGET, "Plugin '{name}' is classified but has no metadata record");
                    PluginRecord {
                        name: name.to_string(),
                        category,
                        classifier_versions,
                        display_name: name.to_string(),
                        ..PluginRecord::default()
                    }
                }
            };

            records.push(record);
        }

        log::info!(target: LOG_TARGET, "Joined dataset holds {} plugins", records.len());

        Self { records }
    }

    /// All rows, ordered by plugin name.
    #[must_use]
    pub fn records(&self) -> &[PluginRecord] {
        &self.records
    }

    /// The rows classified as active.
    pub fn active(&self) -> impl Iterator<Item = &PluginRecord> {
        self.records.iter().filter(|record| record.category == PluginCategory::Active)
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row counts per lifecycle category, in category order.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(PluginCategory, usize)> {
        PluginCategory::iter()
            .map(|category| {
                let count = self.records.iter().filter(|record| record.category == category).count();
                (category, count)
            })
            .collect()
    }
}
