//! Configuration handling for plugin-pulse
//!
//! Configuration controls where the snapshots come from, how long they are
//! cached, and the health scoring policy. Files may be TOML, YAML, or JSON;
//! every field is optional and falls back to the embedded defaults.

#[expect(clippy::module_inception, reason = "config module contains the Config type")]
mod config;
mod health_weights;

pub use config::{Config, DEFAULT_CONFIG_YAML};
pub use health_weights::HealthWeights;
