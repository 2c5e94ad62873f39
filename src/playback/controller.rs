use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::catalog::Track;
use crate::config::Settings;
use crate::player::{AudioDevice, PlayerBackend};

use super::error::PlaybackError;
use super::session::{ActiveTrack, PlaybackState, Session};

/// What a transport action changed, for the coordinator to mirror in the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A (new) track started playing.
    Started(Track),
    Resumed,
    Paused,
    /// Playback ended; the session is empty.
    Stopped,
    /// Nothing changed.
    Unchanged,
}

/// Sole owner of the playback session and the only caller of transport
/// commands on the player.
pub struct PlaybackController {
    player: Box<dyn PlayerBackend>,
    session: Session,
    volume: u8,
    normalize: bool,
    auto_continue: bool,
    url_template: String,
    device: Option<AudioDevice>,
    /// Bumped on every successful `play`; end-of-track notices carry the
    /// value they saw so a late one cannot act on a newer track.
    generation: Arc<AtomicU64>,
}

impl PlaybackController {
    pub fn new(player: Box<dyn PlayerBackend>, settings: &Settings) -> Self {
        Self {
            player,
            session: Session::default(),
            volume: settings.playback.volume.min(100),
            normalize: settings.playback.normalize_volume,
            auto_continue: settings.playback.auto_continue,
            url_template: settings.player.url_template.clone(),
            device: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Play generation of the loaded track.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Shared counter for stamping end-of-track notices off-thread.
    pub fn generation_handle(&self) -> Arc<AtomicU64> {
        self.generation.clone()
    }

    pub fn player(&self) -> &dyn PlayerBackend {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> &mut dyn PlayerBackend {
        self.player.as_mut()
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state()
    }

    pub fn active(&self) -> Option<&ActiveTrack> {
        self.session.active()
    }

    pub fn is_active(&self) -> bool {
        self.session.active().is_some()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn auto_continue(&self) -> bool {
        self.auto_continue
    }

    pub fn device(&self) -> Option<&AudioDevice> {
        self.device.as_ref()
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    fn ensure_available(&self) -> Result<(), PlaybackError> {
        if self.player.is_available() {
            Ok(())
        } else {
            Err(PlaybackError::BackendUnavailable(
                self.player
                    .last_error()
                    .unwrap_or_else(|| "player not initialized".to_string()),
            ))
        }
    }

    /// Start `track`. A different loaded track is stopped first so at most one
    /// stream is ever active; volume and filters are applied before `play`.
    pub fn play(&mut self, track: &Track, index: usize) -> Result<Transition, PlaybackError> {
        self.ensure_available()?;
        let url = track
            .url(&self.url_template)
            .ok_or(PlaybackError::NoPlayableUrl)?;

        if self.is_active() && self.session.differs_from(index, track) {
            self.player.stop()?;
            self.session.clear();
        }

        match self.player.set_volume(self.volume) {
            Ok(applied) => self.volume = applied.min(100),
            Err(e) => warn!(error = %e, "could not apply volume before play"),
        }
        if let Err(e) = self.player.set_normalizer(self.normalize) {
            warn!(error = %e, "could not apply audio filter before play");
        }

        if let Err(e) = self.player.play(&url) {
            // The previous file (same row replay) or a half-started one may
            // still be loaded; nothing may stay loaded without a session.
            if let Err(stop_err) = self.player.stop() {
                warn!(error = %stop_err, "could not unload player after failed play");
            }
            self.session.clear();
            return Err(e.into());
        }
        self.generation.fetch_add(1, Ordering::Relaxed);
        info!(index, title = %track.title, %url, "playing");
        self.session.start(index, track.clone());
        Ok(Transition::Started(track.clone()))
    }

    /// Play/pause. With nothing loaded, or a selection other than the loaded
    /// track, this is `play(selection)`.
    pub fn toggle_play(
        &mut self,
        selection: Option<(usize, &Track)>,
    ) -> Result<Transition, PlaybackError> {
        self.ensure_available()?;
        match (self.is_active(), selection) {
            (false, None) => Err(PlaybackError::NoSelection),
            (false, Some((index, track))) => self.play(track, index),
            (true, Some((index, track))) if self.session.differs_from(index, track) => {
                self.play(track, index)
            }
            (true, _) => {
                let playing = self.player.toggle_pause()?;
                self.session.set_playing(playing);
                debug!(playing, "pause toggled");
                Ok(if playing {
                    Transition::Resumed
                } else {
                    Transition::Paused
                })
            }
        }
    }

    /// Halt the player and clear the session. A no-op when idle.
    pub fn stop(&mut self) -> Result<Transition, PlaybackError> {
        if !self.is_active() {
            return Ok(Transition::Unchanged);
        }
        self.player.stop()?;
        self.session.clear();
        info!("stopped");
        Ok(Transition::Stopped)
    }

    pub fn seek(&mut self, delta: f64) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        if !self.is_active() {
            return Err(PlaybackError::NoActiveTrack);
        }
        self.player.seek(delta)?;
        Ok(())
    }

    /// Clamp to `0..=100` and apply. The backend's answer becomes the stored
    /// value; without a backend the clamped request is stored.
    pub fn set_volume(&mut self, value: i32) -> Result<u8, PlaybackError> {
        let requested = value.clamp(0, 100) as u8;
        if !self.player.is_available() {
            self.volume = requested;
            return Ok(self.volume);
        }
        let applied = self.player.set_volume(requested)?;
        self.volume = applied.min(100);
        Ok(self.volume)
    }

    pub fn change_volume(&mut self, delta: i32) -> Result<u8, PlaybackError> {
        self.set_volume(i32::from(self.volume) + delta)
    }

    /// Natural end of the loaded track. Advances when auto-continue is on and
    /// a next result exists, otherwise stops. A notice stamped with an older
    /// `generation` belongs to a track that was since replaced and is ignored.
    pub fn on_track_end(
        &mut self,
        generation: u64,
        results: &[Track],
    ) -> Result<Transition, PlaybackError> {
        let Some(active) = self.session.active() else {
            debug!("track end with nothing loaded");
            return Ok(Transition::Unchanged);
        };
        if generation != self.generation() {
            debug!(generation, current = self.generation(), "stale track end ignored");
            return Ok(Transition::Unchanged);
        }

        let next = self
            .auto_continue
            .then(|| position_in(results, active).map(|p| p + 1))
            .flatten()
            .filter(|&i| i < results.len());

        match next {
            Some(index) => {
                info!(index, "auto-continue");
                let outcome = self.play(&results[index], index);
                if outcome.is_err() && self.is_active() {
                    // Leave nothing half-loaded behind.
                    if let Err(e) = self.stop() {
                        warn!(error = %e, "stop after failed auto-continue failed");
                    }
                }
                outcome
            }
            None => self.stop(),
        }
    }

    /// Play the result `offset` rows away from the loaded one.
    pub fn skip(&mut self, offset: isize, results: &[Track]) -> Result<Transition, PlaybackError> {
        let active = self.session.active().ok_or(PlaybackError::NoActiveTrack)?;
        let Some(current) = position_in(results, active) else {
            return Ok(Transition::Unchanged);
        };
        match current.checked_add_signed(offset) {
            Some(index) if index < results.len() => self.play(&results[index], index),
            _ => Ok(Transition::Unchanged),
        }
    }

    /// Devices to offer. Falls back to `auto` when the list is empty or the
    /// player cannot answer.
    pub fn list_devices(&self) -> Vec<AudioDevice> {
        let devices = if self.player.is_available() {
            self.player.list_audio_devices().unwrap_or_else(|e| {
                warn!(error = %e, "listing audio devices failed");
                Vec::new()
            })
        } else {
            Vec::new()
        };
        if devices.is_empty() {
            vec![AudioDevice::auto()]
        } else {
            devices
        }
    }

    /// Switch output. The remembered device changes only on success.
    pub fn select_device(&mut self, device: &AudioDevice) -> Result<(), PlaybackError> {
        self.ensure_available()?;
        self.player.set_audio_device(&device.name)?;
        info!(device = %device.name, "audio device selected");
        self.device = Some(device.clone());
        Ok(())
    }

    pub fn toggle_normalizer(&mut self) -> Result<bool, PlaybackError> {
        let enabled = !self.normalize;
        if self.player.is_available() {
            self.player.set_normalizer(enabled)?;
        }
        self.normalize = enabled;
        Ok(enabled)
    }

    pub fn toggle_auto_continue(&mut self) -> bool {
        self.auto_continue = !self.auto_continue;
        self.auto_continue
    }

    pub fn shutdown(&mut self) {
        if self.is_active() {
            let _ = self.player.stop();
            self.session.clear();
        }
        self.player.shutdown();
    }
}

/// Where the loaded track sits in `results`: matched by id first, since the
/// list may have been replaced by a newer search, then by index.
fn position_in(results: &[Track], active: &ActiveTrack) -> Option<usize> {
    if let Some(track) = results.get(active.index) {
        if track.id == active.track.id {
            return Some(active.index);
        }
    }
    results
        .iter()
        .position(|t| !t.id.is_empty() && t.id == active.track.id)
}
