use std::time::Instant;

use tracing::{debug, warn};

use super::Coordinator;
use crate::catalog::Track;
use crate::cover::CoverArt;
use crate::loader::JobKind;
use crate::lyrics::LyricsQuery;
use crate::playback::{PlaybackError, Transition};
use crate::player::AudioDevice;

pub(super) const LOADING_COVER: &str = "Loading cover...";
pub(super) const LOADING_LYRICS: &str = "Loading lyrics...";
pub(super) const PLAY_FAILED: &str = "Error playing";

impl Coordinator {
    pub fn play_selected(&mut self) {
        let Some((index, track)) = self.app.selection() else {
            self.screen.set_status("No results to play.");
            return;
        };
        let track = track.clone();
        let outcome = self.playback.play(&track, index);
        self.settle(outcome, PLAY_FAILED);
    }

    /// Space: play/pause, or switch to the selected row when it is not the
    /// loaded track.
    pub fn toggle_play(&mut self) {
        let selection = self.app.selection().map(|(i, t)| (i, t.clone()));
        let outcome = self
            .playback
            .toggle_play(selection.as_ref().map(|(i, t)| (*i, t)));
        self.settle(outcome, "Error toggling pause");
    }

    /// Play/pause for remote control: never switches track while one is
    /// loaded.
    pub fn toggle_loaded(&mut self) {
        if self.playback.is_active() {
            let outcome = self.playback.toggle_play(None);
            self.settle(outcome, "Error toggling pause");
        } else {
            self.toggle_play();
        }
    }

    pub fn stop(&mut self) {
        let outcome = self.playback.stop();
        self.settle(outcome, "Error stopping");
    }

    pub fn seek(&mut self, seconds: i64) {
        match self.playback.seek(seconds as f64) {
            Ok(()) => {
                let direction = if seconds > 0 { "forward" } else { "back" };
                self.screen
                    .set_status(format!("Seek {direction} {}s", seconds.unsigned_abs()));
            }
            Err(e) => self.report(e, "Error seeking"),
        }
    }

    pub fn change_volume(&mut self, delta: i32) {
        match self.playback.change_volume(delta) {
            Ok(volume) => {
                self.screen.set_volume(volume);
                self.screen.set_status(format!("Volume {volume}%"));
            }
            Err(e) => self.report(e, "Error setting volume"),
        }
    }

    pub fn skip(&mut self, offset: isize) {
        let results = self.app.results.clone();
        let outcome = self.playback.skip(offset, &results);
        self.settle(outcome, PLAY_FAILED);
    }

    pub fn toggle_auto_continue(&mut self) {
        let on = self.playback.toggle_auto_continue();
        self.screen
            .set_status(format!("Auto-continue: {}", if on { "on" } else { "off" }));
    }

    pub fn toggle_normalizer(&mut self) {
        match self.playback.toggle_normalizer() {
            Ok(on) => self
                .screen
                .set_status(format!("Normalize volume: {}", if on { "on" } else { "off" })),
            Err(e) => self.report(e, "Error applying audio filter"),
        }
    }

    pub fn open_devices(&mut self) {
        let devices = self.playback.list_devices();
        let current = self
            .playback
            .device()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| AudioDevice::auto().name);
        self.app.open_devices(devices, &current);
    }

    /// Apply the device under the picker cursor and close the picker.
    pub fn select_picked_device(&mut self) {
        let picked = self.app.picker.as_ref().and_then(|p| p.picked().cloned());
        self.app.close_devices();
        let Some(device) = picked else {
            return;
        };
        match self.playback.select_device(&device) {
            Ok(()) => self.screen.set_status(format!("Audio: {}", device.name)),
            Err(e) => self.report(e, "Error selecting audio device"),
        }
    }

    pub fn cycle_theme(&mut self) {
        let name = self.app.cycle_theme();
        self.screen.set_status(format!("Theme: {}", name.label()));
    }

    /// Mirror a transport outcome into the view, or report its error.
    pub(super) fn settle(&mut self, outcome: Result<Transition, PlaybackError>, context: &str) {
        match outcome {
            Ok(transition) => self.apply(transition),
            Err(e) => self.report(e, context),
        }
    }

    pub(super) fn apply(&mut self, transition: Transition) {
        let now = Instant::now();
        match transition {
            Transition::Started(track) => {
                self.screen
                    .set_status(format!("Playing \"{}\" - {}", track.title, track.artist));
                self.screen.set_now_playing(Some(&track));
                self.screen.set_transport(true);
                self.screen.set_volume(self.playback.volume());
                self.progress.reset();
                self.screen.set_progress(Default::default());
                self.visualizer.reset();
                self.visualizer_timer.resume(now);
                self.energy.resume();
                self.load_extras(&track);
            }
            Transition::Resumed => {
                if let Some(active) = self.playback.active() {
                    let status = format!("Playing \"{}\".", active.track.title);
                    self.screen.set_status(status);
                }
                self.screen.set_transport(true);
                self.visualizer_timer.resume(now);
                self.energy.resume();
            }
            Transition::Paused => {
                self.screen.set_status("Paused.");
                self.screen.set_transport(false);
                self.visualizer_timer.pause();
                self.energy.pause();
            }
            Transition::Stopped => {
                self.screen.set_status("Stopped.");
                self.screen.set_now_playing(None);
                self.screen.set_transport(false);
                self.visualizer_timer.pause();
                self.energy.pause();
                self.visualizer.reset();
                self.screen.clear_energy();
                self.progress.reset();
                self.screen.set_progress(Default::default());
                self.loader.cancel(JobKind::Cover);
                self.loader.cancel(JobKind::Lyrics);
                self.lyrics = None;
                self.screen.reset_cover();
                self.screen.reset_lyrics();
            }
            Transition::Unchanged => return,
        }
        self.sync_mpris();
    }

    /// Start cover and lyrics loads for a new track, superseding the ones
    /// for the previous track.
    fn load_extras(&mut self, track: &Track) {
        self.lyrics = None;
        if track.has_cover() {
            self.loader.cover(&track.id, &track.thumbnail_url);
            self.screen
                .set_cover(Some(&track.id), CoverArt::Text(LOADING_COVER.to_string()));
        } else {
            self.loader.cancel(JobKind::Cover);
            self.screen.set_cover(Some(&track.id), CoverArt::none());
        }
        self.loader.lyrics(LyricsQuery::for_track(track));
        self.screen.lyrics_message(LOADING_LYRICS);
    }

    pub(super) fn report(&mut self, error: PlaybackError, context: &str) {
        debug!(error = %error, context, "transport action failed");
        let text = match &error {
            PlaybackError::BackendUnavailable(reason) => {
                self.screen.disable_controls();
                reason.clone()
            }
            PlaybackError::NoActiveTrack => "Nothing is playing.".to_string(),
            PlaybackError::NoPlayableUrl => "No URL to play this track.".to_string(),
            PlaybackError::NoSelection => "No selection to play.".to_string(),
            PlaybackError::Transient(e) => {
                warn!(error = %e, context, "player command failed");
                match self.playback.player().last_log() {
                    Some(log) if context == PLAY_FAILED => format!("{context}: {e} {log}"),
                    _ => format!("{context}: {e}"),
                }
            }
        };
        // A failed switch leaves nothing loaded; clear the stale view first.
        if !self.playback.is_active() && !self.screen.now_playing.id.is_empty() {
            self.apply(Transition::Stopped);
        }
        self.screen.set_status(text);
    }
}
