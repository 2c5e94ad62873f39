//! File logging. The terminal belongs to the UI, so nothing goes to stderr
//! once the screen is up.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, default_log_path};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "SINTONIA_LOG";

/// Parse a configured level name, falling back to `info`.
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

pub fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings
        .file
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .or_else(default_log_path)
}

fn filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = parse_level(&settings.level);
        EnvFilter::new(format!("warn,sintonia={}", level.as_str().to_ascii_lowercase()))
    })
}

/// Install the global subscriber writing to the log file. Returns the file
/// in use, or `None` when no location could be resolved.
pub fn init(settings: &LogSettings) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = log_path(settings) else {
        return Ok(None);
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_env_filter(filter(settings))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;

    Ok(Some(path))
}

#[cfg(test)]
mod tests;
