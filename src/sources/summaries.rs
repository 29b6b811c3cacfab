//! The metadata snapshot: one summary record per plugin, carrying packaging
//! and distribution details harvested from PyPI and conda-forge.

use crate::Result;
use crate::sources::{Cache, Fetcher};
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "  summaries";
const CACHE_FILE: &str = "extended_summary.json";

/// A single plugin's metadata record.
///
/// Every field is optional: upstream records routinely carry `null` or omit
/// fields entirely, and a sparse record must never sink the whole run. The
/// dataset builder substitutes defaults for whatever is missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PluginSummary {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub normalized_name: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub home_page: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub pypi_versions: Option<Vec<String>>,

    #[serde(default)]
    pub conda_versions: Option<Vec<String>>,

    #[serde(default, rename = "project_url")]
    pub project_urls: Option<Vec<String>>,

    #[serde(default)]
    pub python_requires: Option<String>,

    #[serde(default)]
    pub napari_pin_type: Option<String>,

    #[serde(default)]
    pub requires_dist: Option<Vec<String>>,
}

impl PluginSummary {
    /// The join key for this record: the normalized name when present,
    /// otherwise the raw package name.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.normalized_name.as_deref().or(self.name.as_deref())
    }
}

/// Load the metadata snapshot from the cache, falling back to a fresh
/// download from `url`.
pub fn load(cache: &Cache, fetcher: &Fetcher, url: &str) -> Result<Vec<PluginSummary>> {
    if let Some(records) = cache.load::<Vec<PluginSummary>>(CACHE_FILE) {
        return Ok(records);
    }

    let records: Vec<PluginSummary> = fetcher.fetch_json(url)?;

    log::info!(target: LOG_TARGET, "Loaded {} plugin summaries", records.len());

    if records.is_empty() {
        log::warn!(target: LOG_TARGET, "Metadata snapshot from '{url}' contains no records");
    }

    if let Err(e) = cache.save(CACHE_FILE, &records) {
        log::warn!(target: LOG_TARGET, "Unable to cache metadata snapshot: {e:#}");
    }

    Ok(records)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_deserializes_with_defaults() {
        let record: PluginSummary = serde_json::from_str(r#"{"normalized_name": "npe-widget"}"#).unwrap();
        assert_eq!(record.key(), Some("npe-widget"));
        assert!(record.license.is_none());
        assert!(record.pypi_versions.is_none());
    }

    #[test]
    fn null_fields_deserialize_as_none() {
        let record: PluginSummary = serde_json::from_str(
            r#"{"name": "npe-widget", "license": null, "pypi_versions": null, "project_url": null}"#,
        )
        .unwrap();
        assert_eq!(record.key(), Some("npe-widget"));
        assert!(record.license.is_none());
        assert!(record.pypi_versions.is_none());
        assert!(record.project_urls.is_none());
    }

    #[test]
    fn key_prefers_normalized_name() {
        let record: PluginSummary =
            serde_json::from_str(r#"{"name": "Npe_Widget", "normalized_name": "npe-widget"}"#).unwrap();
        assert_eq!(record.key(), Some("npe-widget"));
    }

    #[test]
    fn key_falls_back_to_raw_name() {
        let record: PluginSummary = serde_json::from_str(r#"{"name": "npe-widget"}"#).unwrap();
        assert_eq!(record.key(), Some("npe-widget"));
    }

    #[test]
    fn record_without_any_name_has_no_key() {
        let record: PluginSummary = serde_json::from_str(r#"{"license": "MIT"}"#).unwrap();
        assert_eq!(record.key(), None);
    }

    #[test]
    fn object_document_is_rejected() {
        let result = serde_json::from_str::<Vec<PluginSummary>>(r#"{"npe-widget": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: PluginSummary = serde_json::from_str(
            r#"{"normalized_name": "npe-widget", "some_future_field": [1, 2, 3]}"#,
        )
        .unwrap();
        assert_eq!(record.key(), Some("npe-widget"));
    }
}
