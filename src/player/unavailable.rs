use super::types::{AudioDevice, PlayerBackend, PlayerError, TimeInfo};

/// Backend used when the engine could not be started.
pub struct UnavailablePlayer {
    reason: String,
}

impl UnavailablePlayer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> PlayerError {
        PlayerError::Unavailable(self.reason.clone())
    }
}

impl PlayerBackend for UnavailablePlayer {
    fn is_available(&self) -> bool {
        false
    }

    fn last_error(&self) -> Option<String> {
        Some(self.reason.clone())
    }

    fn last_log(&self) -> Option<String> {
        None
    }

    fn play(&mut self, _url: &str) -> Result<(), PlayerError> {
        Err(self.err())
    }

    fn toggle_pause(&mut self) -> Result<bool, PlayerError> {
        Err(self.err())
    }

    fn seek(&mut self, _seconds: f64) -> Result<(), PlayerError> {
        Err(self.err())
    }

    fn set_volume(&mut self, _volume: u8) -> Result<u8, PlayerError> {
        Err(self.err())
    }

    fn volume(&self) -> Result<u8, PlayerError> {
        Err(self.err())
    }

    fn set_normalizer(&mut self, _enabled: bool) -> Result<(), PlayerError> {
        Err(self.err())
    }

    fn list_audio_devices(&self) -> Result<Vec<AudioDevice>, PlayerError> {
        Err(self.err())
    }

    fn set_audio_device(&mut self, _name: &str) -> Result<(), PlayerError> {
        Err(self.err())
    }

    fn time_info(&self) -> TimeInfo {
        TimeInfo::default()
    }

    fn sample_energy(&self) -> Result<f64, PlayerError> {
        Err(self.err())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        Err(self.err())
    }

    fn set_end_of_track_notifier(&mut self, _notify: Box<dyn Fn() + Send>) {}
}
