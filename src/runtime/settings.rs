use crate::config::Settings;

/// Effective settings, plus why the configured ones were rejected when the
/// defaults had to be used instead.
pub struct Loaded {
    pub settings: Settings,
    pub rejected: Option<String>,
}

/// Load and validate. A missing file is fine; a broken or invalid one never
/// stops startup, it only falls back to defaults.
pub fn load_settings() -> Loaded {
    let checked = Settings::load()
        .map_err(|e| format!("failed to load: {e}"))
        .and_then(|s| match s.validate() {
            Ok(()) => Ok(s),
            Err(msg) => Err(format!("invalid: {msg}")),
        });
    match checked {
        Ok(settings) => Loaded {
            settings,
            rejected: None,
        },
        Err(reason) => Loaded {
            settings: Settings::default(),
            rejected: Some(reason),
        },
    }
}
