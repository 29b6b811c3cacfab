//! A single row of the joined plugin dataset.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use strum::{Display, EnumIter};

static GITHUB_REPO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://github\.com/([^/\s,]+)/([^/#@\s,]+)").expect("invalid regex"));

/// Dependency name prefixes that indicate a plugin ships a test suite.
const TEST_FRAMEWORKS: &[&str] = &["pytest", "tox", "nox", "hypothesis"];

/// Lifecycle category assigned by the classification snapshot.
///
/// Plugins that only appear in the metadata snapshot are `Unclassified`;
/// a row never lacks a category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, Serialize)]
pub enum PluginCategory {
    Active,
    Withdrawn,
    Deleted,

    #[default]
    Unclassified,
}

/// One plugin in the joined dataset.
///
/// Fields sourced from only one side of the join default to empty when that
/// side is missing, so every accessor is total. The derived predicates are
/// pure functions of the stored fields.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PluginRecord {
    pub name: String,
    pub category: PluginCategory,

    /// Version history from the classification snapshot, empty for rows the
    /// classification source does not know about.
    pub classifier_versions: Vec<String>,

    /// Human-facing label; the builder falls back to `name` when the
    /// metadata record does not declare one.
    pub display_name: String,

    pub summary: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub home_page: Option<String>,
    pub project_urls: Vec<String>,
    pub pypi_versions: Vec<String>,
    pub conda_versions: Vec<String>,
    pub python_requires: Option<String>,
    pub napari_pin_type: Option<String>,
    pub requires_dist: Vec<String>,
    pub github_url: Option<String>,
}

impl PluginRecord {
    /// Whether the plugin declares a non-blank license string.
    #[must_use]
    pub fn has_license(&self) -> bool {
        self.license.as_deref().is_some_and(|license| !license.trim().is_empty())
    }

    /// Whether the plugin declares a non-blank homepage.
    #[must_use]
    pub fn has_homepage(&self) -> bool {
        self.home_page.as_deref().is_some_and(|url| !url.trim().is_empty())
    }

    /// Whether the plugin publishes any project URLs.
    #[must_use]
    pub fn has_project_urls(&self) -> bool {
        !self.project_urls.is_empty()
    }

    /// Whether the plugin has at least one release on PyPI.
    #[must_use]
    pub fn on_pypi(&self) -> bool {
        !self.pypi_versions.is_empty()
    }

    /// Whether the plugin has at least one release on conda-forge.
    #[must_use]
    pub fn on_conda(&self) -> bool {
        !self.conda_versions.is_empty()
    }

    /// Whether any declared dependency is a recognized test framework.
    #[must_use]
    pub fn has_test_dependency(&self) -> bool {
        self.requires_dist.iter().any(|dep| is_test_framework(dep))
    }

    /// Whether the plugin declares a supported Python range.
    #[must_use]
    pub fn declares_python_requires(&self) -> bool {
        self.python_requires.as_deref().is_some_and(|spec| !spec.trim().is_empty())
    }

    /// Whether the plugin leaves napari free to upgrade.
    ///
    /// A pin counts as constrained when it imposes an upper bound (`<`) or
    /// an exact version (`==`). No pin at all is unconstrained.
    #[must_use]
    pub fn unconstrained_napari_pin(&self) -> bool {
        match self.napari_pin_type.as_deref() {
            None => true,
            Some(pin) => !pin.contains('<') && !pin.contains("=="),
        }
    }
}

fn is_test_framework(dependency: &str) -> bool {
    // A requirement line is "name" followed by extras, version specifiers,
    // and environment markers, e.g. "pytest-cov (>=2.0); extra == 'testing'".
    let name = dependency
        .split([' ', '<', '>', '=', '!', '~', ';', '[', '('])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
        .replace('_', "-");

    TEST_FRAMEWORKS
        .iter()
        .any(|framework| name.strip_prefix(framework).is_some_and(|rest| rest.is_empty() || rest.starts_with('-')))
}

/// Extract a canonical GitHub repository URL from a plugin's project URLs,
/// falling back to its homepage. Returns `None` when no URL mentions a
/// GitHub repository.
#[must_use]
pub fn extract_github_url(project_urls: &[String], home_page: Option<&str>) -> Option<String> {
    project_urls
        .iter()
        .map(String::as_str)
        .chain(home_page)
        .find_map(|candidate| {
            let captures = GITHUB_REPO_REGEX.captures(candidate)?;
            let owner = &captures[1];
            let repo = captures[2].trim_end_matches('/');
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            if repo.is_empty() {
                return None;
            }

            Some(format!("https://github.com/{owner}/{repo}"))
        })
}
