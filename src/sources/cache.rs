//! A TTL-aware snapshot cache backed by JSON files.
//!
//! [`Cache`] wraps a cache directory, TTL, and timestamp so that source
//! loaders don't need to thread those values through every load/save call.
//! Setting the refresh flag turns every load into a miss, forcing fresh
//! downloads for the whole run.

use crate::Result;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

const LOG_TARGET: &str = "      cache";

/// On-disk representation of a cache entry: the snapshot plus the time it
/// was fetched, which is what freshness checks run against.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Envelope<T> {
    fetched: DateTime<Utc>,
    snapshot: T,
}

/// A TTL-aware, directory-backed JSON cache for snapshot documents.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
    now: DateTime<Utc>,
    refresh: bool,
}

impl Cache {
    /// Create a new cache.
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>, cache_ttl: Duration, now: DateTime<Utc>, refresh: bool) -> Self {
        Self {
            dir: cache_dir.into(),
            ttl: cache_ttl,
            now,
            refresh,
        }
    }

    /// Load a snapshot by filename (relative to the cache directory).
    ///
    /// Returns `None` for anything that isn't a fresh, well-formed entry:
    /// missing files, corrupt JSON, expired entries, and every load when the
    /// refresh flag is set. A miss is never an error, the caller just fetches.
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Option<T> {
        if self.refresh {
            log::debug!(target: LOG_TARGET, "Skipping cache for {filename}: refresh requested");
            return None;
        }

        let file = match File::open(self.dir.join(filename)) {
            Ok(file) => file,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {filename}: {e:#}");
                return None;
            }
        };

        let envelope: Envelope<T> = match serde_json::from_reader(BufReader::new(file)) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for {filename}: {e:#}");
                return None;
            }
        };

        if self.is_stale(filename, envelope.fetched) {
            return None;
        }

        Some(envelope.snapshot)
    }

    /// Save a snapshot to the cache under the given filename, stamping it
    /// with this cache's timestamp.
    pub fn save<T: Serialize>(&self, filename: &str, snapshot: &T) -> Result<()> {
        let path = self.dir.join(filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{}'", parent.display()))?;
        }

        let envelope = Envelope { fetched: self.now, snapshot };
        let file = File::create(&path).into_app_err_with(|| format!("creating cache file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);

        // Pretty output in debug builds keeps cached snapshots readable.
        if cfg!(debug_assertions) {
            serde_json::to_writer_pretty(&mut writer, &envelope)
        } else {
            serde_json::to_writer(&mut writer, &envelope)
        }
        .into_app_err_with(|| format!("writing cache file '{}'", path.display()))?;

        writer
            .flush()
            .into_app_err_with(|| format!("flushing cache file '{}'", path.display()))
    }

    /// Whether an entry fetched at `fetched` has outlived the TTL. Entries
    /// stamped in the future (clock skew) count as fresh.
    fn is_stale(&self, filename: &str, fetched: DateTime<Utc>) -> bool {
        let age = self.now.signed_duration_since(fetched);
        if age.num_seconds() < 0 {
            log::debug!(target: LOG_TARGET, "Cache timestamp for {filename} is in the future, treating as fresh");
            return false;
        }

        let age = age.to_std().unwrap_or(Duration::MAX);
        if age >= self.ttl {
            log::debug!(
                target: LOG_TARGET,
                "Cache expired for {filename} ({:.1} of {:.1} days)",
                age.as_secs_f64() / 86400.0,
                self.ttl.as_secs_f64() / 86400.0
            );
            return true;
        }

        log::debug!(target: LOG_TARGET, "Cache hit for {filename} ({:.1} days old)", age.as_secs_f64() / 86400.0);
        false
    }
}
