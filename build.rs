//! Validates the default configuration file (`default_config.yml`) that gets
//! embedded into the binary, failing the build if it doesn't deserialize
//! cleanly or trips a validation warning.

#![allow(
    dead_code,
    unused_imports,
    clippy::redundant_pub_crate,
    reason = "the config module is compiled standalone here, so parts of it go unused"
)]

use camino::Utf8PathBuf;
use ohno::IntoAppError;
use std::env;
use std::process;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[path = "src/config/mod.rs"]
mod config;

fn main() {
    println!("cargo:rerun-if-changed=default_config.yml");
    println!("cargo:rerun-if-changed=src/config");

    let warnings = match validate_default_config() {
        Ok(warnings) => warnings,
        Err(e) => {
            eprintln!("unable to load default_config.yml: {e:?}");
            process::exit(1);
        }
    };

    if !warnings.is_empty() {
        for warning in warnings {
            eprintln!("cargo:warning=default_config.yml: {warning}");
        }

        process::exit(1);
    }
}

fn validate_default_config() -> Result<Vec<String>> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let root = Utf8PathBuf::from(&manifest_dir);
    let config_path = root.join("default_config.yml");

    let (_config, warnings) = config::Config::load(&root, Some(&config_path)).into_app_err("unable to load default_config.yml")?;

    Ok(warnings)
}
