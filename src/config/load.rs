use std::{env, path::PathBuf};

use super::schema::Settings;

/// Provider names understood by the lyrics chain.
pub const KNOWN_LYRICS_PROVIDERS: [&str; 2] = ["lrclib", "lyrics-ovh"];

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `SINTONIA__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SINTONIA")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.ui.progress_interval_ms == 0 || self.ui.visualizer_interval_ms == 0 {
            return Err("ui intervals must be >= 1ms".to_string());
        }
        if self.ui.energy_history == 0 {
            return Err("ui.energy_history must be >= 1".to_string());
        }
        if self.catalog.limit == 0 {
            return Err("catalog.limit must be >= 1".to_string());
        }
        if self.lyrics.providers.is_empty() {
            return Err("lyrics.providers must not be empty".to_string());
        }
        if let Some(unknown) = self
            .lyrics
            .providers
            .iter()
            .find(|p| !KNOWN_LYRICS_PROVIDERS.contains(&p.as_str()))
        {
            return Err(format!("unknown lyrics provider: {unknown}"));
        }
        if !self.player.url_template.contains("{id}") {
            return Err("player.url_template must contain {id}".to_string());
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Resolve the config path from `SINTONIA_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SINTONIA_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/sintonia/config.toml`
/// or `~/.config/sintonia/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("sintonia").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/sintonia/sintonia.log`
/// or `~/.local/state/sintonia/sintonia.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("sintonia").join("sintonia.log"))
}
