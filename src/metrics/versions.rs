//! Version release statistics per distribution channel.

use crate::dataset::{PluginRecord, PluginTable};
use serde::Serialize;

/// A plugin and its release count, for the most-released leaderboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub count: usize,
}

/// Release count statistics for a single distribution channel.
///
/// The mean, median, and max are computed over plugins with at least one
/// release in the channel; plugins with none are counted separately rather
/// than dragging the averages down. All three are `None` when no plugin has
/// released in the channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelVersionStats {
    pub plugins_with_releases: usize,
    pub plugins_without_releases: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<usize>,
    pub top: Vec<LeaderboardEntry>,
}

/// Release statistics for both distribution channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionStats {
    pub pypi: ChannelVersionStats,
    pub conda: ChannelVersionStats,
}

/// Compute release count statistics for both channels.
///
/// `leaderboard_size` caps the most-released lists; ties are broken by
/// plugin name so the output is deterministic.
#[must_use]
pub fn version_patterns(table: &PluginTable, leaderboard_size: usize) -> VersionStats {
    VersionStats {
        pypi: channel_stats(table, leaderboard_size, |record| &record.pypi_versions),
        conda: channel_stats(table, leaderboard_size, |record| &record.conda_versions),
    }
}

fn channel_stats(
    table: &PluginTable,
    leaderboard_size: usize,
    versions: impl Fn(&PluginRecord) -> &Vec<String>,
) -> ChannelVersionStats {
    let mut counts: Vec<(usize, &str)> = Vec::new();
    let mut without = 0usize;

    for record in table.records() {
        let count = versions(record).len();
        if count == 0 {
            without += 1;
        } else {
            counts.push((count, record.name.as_str()));
        }
    }

    counts.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));

    let top = counts
        .iter()
        .take(leaderboard_size)
        .map(|(count, name)| LeaderboardEntry {
            name: (*name).to_string(),
            count: *count,
        })
        .collect();

    ChannelVersionStats {
        plugins_with_releases: counts.len(),
        plugins_without_releases: without,
        mean: mean(&counts),
        median: median(&counts),
        max: counts.first().map(|(count, _)| *count),
        top,
    }
}

#[expect(clippy::cast_precision_loss, reason = "release counts are far below 2^52")]
fn mean(counts: &[(usize, &str)]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }

    let total: usize = counts.iter().map(|(count, _)| count).sum();
    Some(total as f64 / counts.len() as f64)
}

/// Median of the release counts. Expects `counts` sorted by count
/// (direction doesn't matter for the median).
#[expect(clippy::cast_precision_loss, reason = "release counts are far below 2^52")]
fn median(counts: &[(usize, &str)]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }

    let mid = counts.len() / 2;
    if counts.len() % 2 == 1 {
        Some(counts[mid].0 as f64)
    } else {
        Some((counts[mid - 1].0 + counts[mid].0) as f64 / 2.0)
    }
}
