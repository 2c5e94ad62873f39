//! The owning coordinator: one object composed of the independent services,
//! living on the event-loop thread.
//!
//! It is the only place where playback, fetch results and timers meet the
//! view. Worker and backend threads reach it exclusively through
//! [`AppMsg`](crate::message::AppMsg).

mod events;
mod input;
mod transport;

use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::app::App;
use crate::config::{PlaybackSettings, Settings, VisualizerStyle};
use crate::driver::{Interval, ProgressDriver, VisualizerDriver};
use crate::energy::EnergySource;
use crate::loader::{Loader, Sources};
use crate::lyrics::LyricsDoc;
use crate::message::AppMsg;
use crate::mpris::{MprisHandle, TrackMeta};
use crate::playback::PlaybackController;
use crate::player::PlayerBackend;
use crate::theme::{Theme, theme};
use crate::view::Screen;

/// Whether the event loop keeps running.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Coordinator {
    app: App,
    screen: Screen,
    playback: PlaybackController,
    progress: ProgressDriver,
    visualizer: VisualizerDriver,
    progress_timer: Interval,
    visualizer_timer: Interval,
    energy: EnergySource,
    loader: Loader,
    /// Parsed lyrics of the loaded track.
    lyrics: Option<LyricsDoc>,
    steps: PlaybackSettings,
    visualizer_style: VisualizerStyle,
    mpris: Option<MprisHandle>,
}

impl Coordinator {
    pub fn new(
        settings: &Settings,
        player: Box<dyn PlayerBackend>,
        energy: EnergySource,
        sources: Sources,
        tx: Sender<AppMsg>,
    ) -> Self {
        let mut screen = Screen::new();
        if player.is_available() {
            screen.set_status("Press / to search.");
        } else {
            let reason = player
                .last_error()
                .unwrap_or_else(|| "player not initialized".to_string());
            warn!(%reason, "transport controls disabled");
            screen.set_status(reason);
            screen.disable_controls();
        }
        if energy.is_capture() {
            info!("visualizer uses audio capture");
        }

        let now = Instant::now();
        let ui = &settings.ui;
        let mut playback = PlaybackController::new(player, settings);
        let notify = tx.clone();
        let generation = playback.generation_handle();
        playback
            .player_mut()
            .set_end_of_track_notifier(Box::new(move || {
                let _ = notify.send(AppMsg::TrackEnded {
                    generation: generation.load(Ordering::Relaxed),
                });
            }));
        screen.set_volume(playback.volume());

        Self {
            app: App::new(ui.theme),
            screen,
            playback,
            progress: ProgressDriver::new(),
            visualizer: VisualizerDriver::new(ui.energy_history),
            progress_timer: Interval::new(Duration::from_millis(ui.progress_interval_ms), now),
            visualizer_timer: Interval::new_paused(
                Duration::from_millis(ui.visualizer_interval_ms),
                now,
            ),
            energy,
            loader: Loader::new(sources, tx, settings.catalog.limit, ui.cover_style),
            lyrics: None,
            steps: settings.playback.clone(),
            visualizer_style: ui.visualizer_style,
            mpris: None,
        }
    }

    pub fn attach_mpris(&mut self, handle: MprisHandle) {
        self.mpris = Some(handle);
        self.sync_mpris();
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn lyrics(&self) -> Option<&LyricsDoc> {
        self.lyrics.as_ref()
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn theme(&self) -> &'static Theme {
        theme(self.app.theme)
    }

    pub fn visualizer_style(&self) -> VisualizerStyle {
        self.visualizer_style
    }

    pub fn visualizer_running(&self) -> bool {
        !self.visualizer_timer.is_paused()
    }

    /// How long the loop may wait for input before a timer is due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        [
            self.progress_timer.remaining(now),
            self.visualizer_timer.remaining(now),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn sync_mpris(&self) {
        let Some(mpris) = &self.mpris else {
            return;
        };
        mpris.set_playback(self.playback.state());
        let meta = self
            .playback
            .active()
            .map(|a| TrackMeta::new(&a.track, a.track.url(self.playback.url_template())));
        mpris.set_track(meta);
    }

    pub fn shutdown(&mut self) {
        self.loader.cancel_all();
        self.energy.pause();
        self.playback.shutdown();
        info!("shut down");
    }
}
