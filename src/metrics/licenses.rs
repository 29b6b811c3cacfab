//! License normalization and breakdown.

use crate::dataset::PluginTable;
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter};

/// Normalized license families reported by the license breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
pub enum LicenseFamily {
    #[strum(serialize = "MIT")]
    Mit,

    #[strum(serialize = "BSD-3-Clause")]
    Bsd3Clause,

    #[strum(serialize = "BSD-2-Clause")]
    Bsd2Clause,

    #[strum(serialize = "BSD (Other)")]
    BsdOther,

    #[strum(serialize = "Apache")]
    Apache,

    #[strum(serialize = "LGPL")]
    Lgpl,

    #[strum(serialize = "GPL")]
    Gpl,

    #[strum(serialize = "Creative Commons")]
    CreativeCommons,

    #[strum(serialize = "Other")]
    Other,

    #[strum(serialize = "Unspecified")]
    Unspecified,
}

/// Ordered classification rules: the first rule whose substrings all appear
/// in the lowercased license string wins. LGPL must precede GPL, and the
/// numbered BSD clauses must precede the BSD catch-all.
const CLASSIFICATION_RULES: &[(&[&str], LicenseFamily)] = &[
    (&["mit"], LicenseFamily::Mit),
    (&["bsd", "3"], LicenseFamily::Bsd3Clause),
    (&["bsd", "2"], LicenseFamily::Bsd2Clause),
    (&["bsd"], LicenseFamily::BsdOther),
    (&["apache"], LicenseFamily::Apache),
    (&["lgpl"], LicenseFamily::Lgpl),
    (&["gpl"], LicenseFamily::Gpl),
    (&["creative commons"], LicenseFamily::CreativeCommons),
    (&["cc"], LicenseFamily::CreativeCommons),
];

impl LicenseFamily {
    /// Normalize a raw license string to its family.
    ///
    /// Matching is case-insensitive and substring-based, which copes with
    /// the free-form strings found in plugin metadata ("MIT License",
    /// "License :: OSI Approved :: BSD License", bare "GPLv3", and so on).
    /// Blank or missing strings map to [`LicenseFamily::Unspecified`],
    /// anything unrecognized to [`LicenseFamily::Other`].
    #[must_use]
    pub fn classify(license: Option<&str>) -> Self {
        let Some(license) = license else {
            return Self::Unspecified;
        };

        let license = license.trim().to_lowercase();
        if license.is_empty() {
            return Self::Unspecified;
        }

        for (patterns, family) in CLASSIFICATION_RULES {
            if patterns.iter().all(|pattern| license.contains(pattern)) {
                return *family;
            }
        }

        Self::Other
    }
}

impl Serialize for LicenseFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One license family's share of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseEntry {
    pub family: LicenseFamily,
    pub count: usize,
    pub percent: f64,
}

/// License families across the table, largest first.
///
/// Every row contributes to exactly one family (blank licenses land in
/// `Unspecified`), so for a non-empty table the percentages sum to 100
/// within rounding error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseBreakdown {
    pub total: usize,
    pub entries: Vec<LicenseEntry>,
}

impl LicenseBreakdown {
    /// Rows that declare any license at all.
    #[must_use]
    pub fn specified(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.family != LicenseFamily::Unspecified)
            .map(|entry| entry.count)
            .sum()
    }
}

/// Normalize every row's license and count the families.
#[expect(clippy::cast_precision_loss, reason = "plugin counts are far below 2^52")]
#[must_use]
pub fn license_patterns(table: &PluginTable) -> LicenseBreakdown {
    let mut counts: Vec<(LicenseFamily, usize)> = Vec::new();

    for record in table.records() {
        let family = LicenseFamily::classify(record.license.as_deref());
        match counts.iter_mut().find(|(existing, _)| *existing == family) {
            Some((_, count)) => *count += 1,
            None => counts.push((family, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let total = table.len();
    let entries = counts
        .into_iter()
        .map(|(family, count)| LicenseEntry {
            family,
            count,
            percent: if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 },
        })
        .collect();

    LicenseBreakdown { total, entries }
}
