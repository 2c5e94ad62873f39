//! Player contract types shared by every backend.

use thiserror::Error;

/// Failure of a single player command.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("{0}")]
    Unavailable(String),
    #[error("player I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("player did not answer in time")]
    Timeout,
    #[error("player rejected command: {0}")]
    Command(String),
    #[error("malformed player reply: {0}")]
    Protocol(String),
}

/// One selectable output device as reported by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    pub name: String,
    pub description: String,
}

impl AudioDevice {
    /// The device that lets the player choose on its own.
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            description: "Auto".to_string(),
        }
    }
}

/// Raw time information for the loaded track. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeInfo {
    pub position: Option<f64>,
    pub duration: Option<f64>,
    pub percent: Option<f64>,
}

impl TimeInfo {
    /// Fill in a missing position from duration and percent.
    pub fn normalized(mut self) -> Self {
        if self.position.is_none() {
            if let (Some(dur), Some(pct)) = (self.duration, self.percent) {
                self.position = Some((dur * (pct / 100.0)).clamp(0.0, dur.max(0.0)));
            }
        }
        self
    }
}

/// Why the player finished a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// Natural completion.
    Eof,
    /// Playback failed; carries a short description.
    Error(String),
    /// Stopped, replaced, quit or redirected: not a track end.
    Other(String),
}

/// Control surface over an external playback engine.
///
/// Only the playback controller issues transport commands; the driver only
/// reads `time_info` and `sample_energy`.
pub trait PlayerBackend {
    fn is_available(&self) -> bool;
    /// Why the backend is unavailable, if it is.
    fn last_error(&self) -> Option<String>;
    /// Latest warning/error emitted by the engine.
    fn last_log(&self) -> Option<String>;

    fn play(&mut self, url: &str) -> Result<(), PlayerError>;
    /// Flip the pause state. Returns `true` when playing afterwards.
    fn toggle_pause(&mut self) -> Result<bool, PlayerError>;
    /// Relative seek in seconds.
    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError>;
    /// Apply a volume in `0..=100`; returns the value the engine actually holds.
    fn set_volume(&mut self, volume: u8) -> Result<u8, PlayerError>;
    fn volume(&self) -> Result<u8, PlayerError>;
    /// Enable or disable the loudness normalizer filter.
    fn set_normalizer(&mut self, enabled: bool) -> Result<(), PlayerError>;
    fn list_audio_devices(&self) -> Result<Vec<AudioDevice>, PlayerError>;
    fn set_audio_device(&mut self, name: &str) -> Result<(), PlayerError>;
    fn time_info(&self) -> TimeInfo;
    /// Coarse `0..=1` activity estimate from engine properties.
    fn sample_energy(&self) -> Result<f64, PlayerError>;
    /// Unload the current file.
    fn stop(&mut self) -> Result<(), PlayerError>;
    /// Register the callback for natural track ends. It may run on a
    /// backend-owned thread.
    fn set_end_of_track_notifier(&mut self, notify: Box<dyn Fn() + Send>);
    fn shutdown(&mut self) {}
}

/// Bitrate/volume heuristic used when no better energy source exists.
///
/// `bitrate` is in bits per second (0 when unknown), `volume` in `0..=100`.
pub fn bitrate_energy(bitrate: f64, volume: f64) -> f64 {
    let normalized_br = if bitrate > 0.0 {
        (bitrate / 320_000.0).min(1.0)
    } else {
        0.2
    };
    let vol = (volume / 100.0).clamp(0.0, 1.0);
    (normalized_br * (0.5 + vol / 2.0)).clamp(0.0, 1.0)
}
