//! Pieces shared by the plugin-pulse commands.

use crate::Result;
use camino::Utf8PathBuf;
use clap::ValueEnum;
use directories::BaseDirs;
use ohno::IntoAppError;
use std::path::PathBuf;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Never use colors
    Never,
    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Initialize logger based on log level
pub(crate) fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

/// Determine the snapshot cache directory: use the provided path or the default
/// cache directory for the platform.
pub(crate) fn resolve_cache_dir(cache_dir: Option<&Utf8PathBuf>) -> Result<PathBuf> {
    if let Some(cache_path) = cache_dir {
        return Ok(cache_path.as_std_path().to_path_buf());
    }

    Ok(BaseDirs::new()
        .into_app_err("Failed to determine cache directory")?
        .cache_dir()
        .join("plugin-pulse"))
}
