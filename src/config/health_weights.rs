use serde::{Deserialize, Serialize};

const fn default_weight() -> f64 {
    1.0
}

/// Relative weights of the criteria that make up a plugin's health score.
///
/// A plugin's score is the weighted fraction of satisfied criteria: the sum of
/// the weights of the criteria the plugin meets, divided by the sum of all
/// weights. Every weight defaults to 1.0, which makes the score the plain
/// fraction of satisfied criteria. Setting a weight to 0.0 removes that
/// criterion from scoring entirely.
///
/// The criteria are:
/// - `has_license`: the plugin declares a license
/// - `has_homepage`: the plugin declares a homepage URL
/// - `has_project_urls`: the plugin declares at least one project URL
/// - `has_conda`: the plugin has at least one conda-forge release
/// - `has_test_dependency`: the plugin declares a known test framework dependency
/// - `declares_python_requires`: the plugin declares a Python version requirement
/// - `unconstrained_napari_pin`: the plugin does not pin napari to an upper bound
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HealthWeights {
    #[serde(default = "default_weight")]
    pub has_license: f64,

    #[serde(default = "default_weight")]
    pub has_homepage: f64,

    #[serde(default = "default_weight")]
    pub has_project_urls: f64,

    #[serde(default = "default_weight")]
    pub has_conda: f64,

    #[serde(default = "default_weight")]
    pub has_test_dependency: f64,

    #[serde(default = "default_weight")]
    pub declares_python_requires: f64,

    #[serde(default = "default_weight")]
    pub unconstrained_napari_pin: f64,
}

impl HealthWeights {
    /// Sum of all criterion weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.has_license
            + self.has_homepage
            + self.has_project_urls
            + self.has_conda
            + self.has_test_dependency
            + self.declares_python_requires
            + self.unconstrained_napari_pin
    }

    /// Detect weight assignments that make scoring meaningless.
    pub(crate) fn validate(&self, warnings: &mut Vec<String>) {
        let named = [
            ("has_license", self.has_license),
            ("has_homepage", self.has_homepage),
            ("has_project_urls", self.has_project_urls),
            ("has_conda", self.has_conda),
            ("has_test_dependency", self.has_test_dependency),
            ("declares_python_requires", self.declares_python_requires),
            ("unconstrained_napari_pin", self.unconstrained_napari_pin),
        ];

        for (name, weight) in named {
            if weight < 0.0 {
                warnings.push(format!("health weight '{name}' is negative ({weight}); weights must be >= 0"));
            }
        }

        if self.total() <= 0.0 {
            warnings.push("all health weights are zero; every plugin will have an undefined health score".to_string());
        }
    }
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            has_license: default_weight(),
            has_homepage: default_weight(),
            has_project_urls: default_weight(),
            has_conda: default_weight(),
            has_test_dependency: default_weight(),
            declares_python_requires: default_weight(),
            unconstrained_napari_pin: default_weight(),
        }
    }
}
