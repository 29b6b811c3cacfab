//! The classification snapshot: plugin lifecycle categories and the version
//! histories recorded for each.

use crate::Result;
use crate::sources::{Cache, Fetcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LOG_TARGET: &str = "classifiers";
const CACHE_FILE: &str = "classifiers.json";

/// The classification snapshot, keyed by lifecycle category.
///
/// Each category maps normalized plugin names to the versions published
/// under that category. Missing categories deserialize as empty maps so a
/// snapshot that only carries `active` plugins is still usable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClassifiersDoc {
    #[serde(default)]
    pub active: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub withdrawn: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub deleted: BTreeMap<String, Vec<String>>,
}

impl ClassifiersDoc {
    /// Total number of plugin entries across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.withdrawn.len() + self.deleted.len()
    }

    /// Whether the snapshot classifies no plugins at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load the classification snapshot from the cache, falling back to a fresh
/// download from `url`.
pub fn load(cache: &Cache, fetcher: &Fetcher, url: &str) -> Result<ClassifiersDoc> {
    if let Some(doc) = cache.load::<ClassifiersDoc>(CACHE_FILE) {
        return Ok(doc);
    }

    let doc: ClassifiersDoc = fetcher.fetch_json(url)?;

    log::info!(
        target: LOG_TARGET,
        "Loaded {} active, {} withdrawn, {} deleted plugins",
        doc.active.len(),
        doc.withdrawn.len(),
        doc.deleted.len()
    );

    if doc.is_empty() {
        log::warn!(target: LOG_TARGET, "Classification snapshot from '{url}' contains no plugins");
    }

    if let Err(e) = cache.save(CACHE_FILE, &doc) {
        log::warn!(target: LOG_TARGET, "Unable to cache classification snapshot: {e:#}");
    }

    Ok(doc)
}
