//! Recording backend for tests.

use std::sync::{Arc, Mutex};

use super::types::{AudioDevice, PlayerBackend, PlayerError, TimeInfo};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Play(String),
    TogglePause,
    Seek(f64),
    SetVolume(u8),
    SetNormalizer(bool),
    SetDevice(String),
    Stop,
}

pub struct FakeState {
    pub calls: Vec<Call>,
    pub available: bool,
    pub paused: bool,
    pub volume: u8,
    /// Highest volume the backend accepts; emulates engines that cap it.
    pub volume_cap: u8,
    pub time: TimeInfo,
    pub energy: Option<f64>,
    pub devices: Vec<AudioDevice>,
    /// Make every transport command fail with a timeout.
    pub failing: bool,
    /// Only `play` fails; every other command still works.
    pub fail_play: bool,
    pub notifier: Option<Box<dyn Fn() + Send>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            available: true,
            paused: false,
            volume: 100,
            volume_cap: 100,
            time: TimeInfo::default(),
            energy: None,
            devices: Vec::new(),
            failing: false,
            fail_play: false,
            notifier: None,
        }
    }
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakePlayer {
    state: Shared,
}

impl FakePlayer {
    pub fn new() -> (Self, Shared) {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }

    fn record(&self, call: Call) -> Result<(), PlayerError> {
        let mut s = self.state.lock().unwrap();
        if !s.available {
            return Err(PlayerError::Unavailable("fake offline".into()));
        }
        if s.failing {
            return Err(PlayerError::Timeout);
        }
        s.calls.push(call);
        Ok(())
    }
}

pub fn calls(state: &Shared) -> Vec<Call> {
    state.lock().unwrap().calls.clone()
}

pub fn clear_calls(state: &Shared) {
    state.lock().unwrap().calls.clear();
}

/// Invoke the registered end-of-track callback, as the reader thread would.
pub fn fire_track_end(state: &Shared) {
    let s = state.lock().unwrap();
    if let Some(cb) = s.notifier.as_ref() {
        cb();
    }
}

impl PlayerBackend for FakePlayer {
    fn is_available(&self) -> bool {
        self.state.lock().unwrap().available
    }

    fn last_error(&self) -> Option<String> {
        (!self.is_available()).then(|| "fake offline".to_string())
    }

    fn last_log(&self) -> Option<String> {
        None
    }

    fn play(&mut self, url: &str) -> Result<(), PlayerError> {
        if self.state.lock().unwrap().fail_play {
            return Err(PlayerError::Timeout);
        }
        self.record(Call::Play(url.to_string()))?;
        self.state.lock().unwrap().paused = false;
        Ok(())
    }

    fn toggle_pause(&mut self) -> Result<bool, PlayerError> {
        self.record(Call::TogglePause)?;
        let mut s = self.state.lock().unwrap();
        s.paused = !s.paused;
        Ok(!s.paused)
    }

    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.record(Call::Seek(seconds))
    }

    fn set_volume(&mut self, volume: u8) -> Result<u8, PlayerError> {
        self.record(Call::SetVolume(volume))?;
        let mut s = self.state.lock().unwrap();
        s.volume = volume.min(s.volume_cap);
        Ok(s.volume)
    }

    fn volume(&self) -> Result<u8, PlayerError> {
        Ok(self.state.lock().unwrap().volume)
    }

    fn set_normalizer(&mut self, enabled: bool) -> Result<(), PlayerError> {
        self.record(Call::SetNormalizer(enabled))
    }

    fn list_audio_devices(&self) -> Result<Vec<AudioDevice>, PlayerError> {
        let s = self.state.lock().unwrap();
        if !s.available {
            return Err(PlayerError::Unavailable("fake offline".into()));
        }
        Ok(s.devices.clone())
    }

    fn set_audio_device(&mut self, name: &str) -> Result<(), PlayerError> {
        self.record(Call::SetDevice(name.to_string()))
    }

    fn time_info(&self) -> TimeInfo {
        self.state.lock().unwrap().time
    }

    fn sample_energy(&self) -> Result<f64, PlayerError> {
        self.state
            .lock()
            .unwrap()
            .energy
            .ok_or_else(|| PlayerError::Command("no bitrate".into()))
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.record(Call::Stop)
    }

    fn set_end_of_track_notifier(&mut self, notify: Box<dyn Fn() + Send>) {
        self.state.lock().unwrap().notifier = Some(notify);
    }
}
