use crate::Result;
use crate::config::HealthWeights;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration YAML content, embedded from `default_config.yml`
pub const DEFAULT_CONFIG_YAML: &str = include_str!("../../default_config.yml");

fn default_classifiers_url() -> String {
    "https://raw.githubusercontent.com/napari/npe2api/main/public/classifiers.json".to_string()
}

fn default_summaries_url() -> String {
    "https://raw.githubusercontent.com/napari/npe2api/main/public/extended_summary.json".to_string()
}

const fn default_snapshot_cache_ttl() -> u64 {
    7
}

const fn default_fetch_timeout() -> u64 {
    30
}

const fn default_leaderboard_size() -> usize {
    5
}

const fn default_needs_attention_size() -> usize {
    5
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// URL of the classification snapshot (lifecycle category -> plugin -> version history)
    #[serde(default = "default_classifiers_url")]
    pub classifiers_url: String,

    /// URL of the extended summary snapshot (per-plugin descriptive metadata)
    #[serde(default = "default_summaries_url")]
    pub summaries_url: String,

    /// Number of days to keep cached snapshots before re-downloading
    #[serde(default = "default_snapshot_cache_ttl")]
    pub snapshot_cache_ttl: u64,

    /// HTTP timeout in seconds for snapshot downloads
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,

    /// Number of entries in the "most released" leaderboards
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Number of plugins listed in the report's "needs attention" section
    #[serde(default = "default_needs_attention_size")]
    pub needs_attention_size: usize,

    /// Weights of the individual health scoring criteria
    #[serde(default)]
    pub health: HealthWeights,
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When no explicit path is given, looks for `pulse.toml`, `pulse.yml`,
    /// `pulse.yaml`, or `pulse.json` under `root`, in that order. Returns the
    /// parsed configuration along with any non-fatal validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading plugin-pulse configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                root.join("pulse.toml"),
                root.join("pulse.yml"),
                root.join("pulse.yaml"),
                root.join("pulse.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading plugin-pulse configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match (extension, text.trim()) {
            // An empty file means "all defaults", regardless of format.
            ("toml" | "yml" | "yaml" | "json", "") => Self::default(),
            ("toml", _) => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            ("yml" | "yaml", _) => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            ("json", _) => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings);
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration to a file, preserving comments for YAML format
    ///
    /// When saving to YAML, this writes the raw content of `default_config.yml`
    /// with all comments intact. Other formats get a plain serialization of the
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default_with_comments(output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();

        if matches!(extension, "yml" | "yaml") {
            fs::write(output_path, DEFAULT_CONFIG_YAML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        } else {
            Self::default().save(output_path)?;
        }

        Ok(())
    }

    /// Validate the configuration to detect non-sensical settings
    fn validate(&self, warnings: &mut Vec<String>) {
        if self.classifiers_url.trim().is_empty() {
            warnings.push("classifiers_url is empty; the classification snapshot cannot be fetched".to_string());
        }

        if self.summaries_url.trim().is_empty() {
            warnings.push("summaries_url is empty; the summary snapshot cannot be fetched".to_string());
        }

        if self.fetch_timeout == 0 {
            warnings.push("fetch_timeout is 0 seconds; snapshot downloads will fail immediately".to_string());
        }

        if self.leaderboard_size == 0 {
            warnings.push("leaderboard_size is 0; the most-released lists will be empty".to_string());
        }

        self.health.validate(warnings);
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG_YAML).expect("default_config.yml should be valid YAML that deserializes to Config")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_field_defaults() {
        let config = Config::default();
        assert_eq!(config.classifiers_url, default_classifiers_url());
        assert_eq!(config.summaries_url, default_summaries_url());
        assert_eq!(config.snapshot_cache_ttl, default_snapshot_cache_ttl());
        assert_eq!(config.fetch_timeout, default_fetch_timeout());
        assert_eq!(config.leaderboard_size, default_leaderboard_size());
        assert_eq!(config.needs_attention_size, default_needs_attention_size());
        assert_eq!(config.health, HealthWeights::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn load_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

        let (config, warnings) = Config::load(&root, None).unwrap();
        assert_eq!(config.snapshot_cache_ttl, default_snapshot_cache_ttl());
        assert!(warnings.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn load_toml_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.toml");
        fs::write(&path, "snapshot_cache_ttl = 14\n\n[health]\nhas_conda = 0.0\n").unwrap();

        let (config, warnings) = Config::load(&root, None).unwrap();
        assert_eq!(config.snapshot_cache_ttl, 14);
        assert!((config.health.has_conda - 0.0).abs() < f64::EPSILON);
        assert!((config.health.has_license - 1.0).abs() < f64::EPSILON);
        assert!(warnings.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn load_empty_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.yml");
        fs::write(&path, "").unwrap();

        let (config, warnings) = Config::load(&root, None).unwrap();
        assert_eq!(config.classifiers_url, default_classifiers_url());
        assert_eq!(config.snapshot_cache_ttl, default_snapshot_cache_ttl());
        assert_eq!(config.health, HealthWeights::default());
        assert!(warnings.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn load_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.toml");
        fs::write(&path, "no_such_setting = true\n").unwrap();

        let result = Config::load(&root, Some(&path));
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn load_rejects_unsupported_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.ini");
        fs::write(&path, "").unwrap();

        let result = Config::load(&root, Some(&path));
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn validation_warnings_surface_through_load() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.toml");
        fs::write(&path, "fetch_timeout = 0\nleaderboard_size = 0\n").unwrap();

        let (_, warnings) = Config::load(&root, Some(&path)).unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn save_and_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        let path = root.join("pulse.toml");

        let config = Config::default();
        config.save(&path).unwrap();

        let (reloaded, _) = Config::load(&root, Some(&path)).unwrap();
        assert_eq!(reloaded.classifiers_url, config.classifiers_url);
        assert_eq!(reloaded.health, config.health);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn save_default_yaml_preserves_comments() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("pulse.yml")).unwrap();

        Config::save_default_with_comments(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains('#'));
        assert_eq!(written, DEFAULT_CONFIG_YAML);
    }
}
