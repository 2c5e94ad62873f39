use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/sintonia/config.toml` or `~/.config/sintonia/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SINTONIA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub catalog: CatalogSettings,
    pub lyrics: LyricsSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub visualizer: VisualizerSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Path or name of the `mpv` executable.
    pub mpv_path: String,
    /// Extra command-line arguments passed to `mpv` verbatim.
    pub extra_args: Vec<String>,
    /// How long to wait for a reply to a single IPC command (milliseconds).
    pub ipc_timeout_ms: u64,
    /// How long to wait for the IPC socket to appear after spawning (milliseconds).
    pub connect_timeout_ms: u64,
    /// Template used to turn a track id into a playable URL. `{id}` is replaced.
    pub url_template: String,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            mpv_path: "mpv".to_string(),
            extra_args: Vec::new(),
            ipc_timeout_ms: 2000,
            connect_timeout_ms: 3000,
            url_template: "https://www.youtube.com/watch?v={id}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the search service.
    pub base_url: String,
    /// Maximum number of results kept per search.
    pub limit: usize,
    /// Network timeout for a single search (seconds).
    pub timeout_secs: u64,
    /// Network timeout for fetching a result's cover image (seconds).
    pub cover_timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://inv.nadeko.net".to_string(),
            limit: 20,
            timeout_secs: 8,
            cover_timeout_secs: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LyricsSettings {
    /// Providers to ask, in priority order. First non-empty answer wins.
    ///
    /// Known names: "lrclib", "lyrics-ovh".
    pub providers: Vec<String>,
    /// Network timeout for each lyrics provider request (seconds).
    pub timeout_secs: u64,
}

impl Default for LyricsSettings {
    fn default() -> Self {
        Self {
            providers: vec!["lrclib".to_string(), "lyrics-ovh".to_string()],
            timeout_secs: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume (0-100).
    pub volume: u8,
    /// Seconds to seek with Left/Right.
    pub seek_step: u32,
    /// Seconds to seek with `[` / `]`.
    pub big_seek_step: u32,
    /// Volume change per key press.
    pub volume_step: u8,
    /// Advance to the next search result when a track ends naturally.
    pub auto_continue: bool,
    /// Start with the loudness normalizer filter enabled.
    pub normalize_volume: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 50,
            seek_step: 5,
            big_seek_step: 15,
            volume_step: 5,
            auto_continue: true,
            normalize_volume: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Progress loop period (milliseconds).
    pub progress_interval_ms: u64,
    /// Visualizer loop period (milliseconds).
    pub visualizer_interval_ms: u64,
    /// Number of energy samples kept in the rolling trace.
    pub energy_history: usize,
    pub visualizer_style: VisualizerStyle,
    pub cover_style: CoverStyle,
    pub theme: ThemeName,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 500,
            visualizer_interval_ms: 200,
            energy_history: 80,
            visualizer_style: VisualizerStyle::Sparkline,
            cover_style: CoverStyle::Blocks,
            theme: ThemeName::Dark,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualizerStyle {
    /// Rolling trace of recent energy samples.
    Sparkline,
    /// Text-art columns driven by the latest sample.
    #[serde(alias = "spectrum")]
    Bars,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverStyle {
    /// Coloured half-block cells.
    #[serde(alias = "half-blocks", alias = "color")]
    Blocks,
    /// Luminance ASCII art.
    #[serde(alias = "text")]
    Ascii,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Dracula,
    Caramel,
    Light,
    Mini,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Try to capture real audio (e.g. a PulseAudio/PipeWire monitor source).
    pub capture: bool,
    /// Name of the input device to capture from. `None` uses the default input.
    pub device: Option<String>,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            capture: true,
            device: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of "error", "warn", "info", "debug", "trace".
    pub level: String,
    /// Log file path. `None` uses the XDG state directory.
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
