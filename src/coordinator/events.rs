use std::time::Instant;

use tracing::debug;

use super::transport::PLAY_FAILED;
use super::{Coordinator, Flow};
use crate::catalog::Track;
use crate::cover::CoverArt;
use crate::loader::JobKind;
use crate::message::{AppMsg, LoadedLyrics, Ticket};
use crate::mpris::ControlCmd;
use crate::playback::PlaybackState;
use crate::view::NO_LYRICS;

impl Coordinator {
    /// Start a search; any search still in flight is superseded.
    pub fn search(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.screen.set_status("Type something to search.");
            return;
        }
        self.loader.search(query);
        self.screen.set_status(format!("Searching \"{query}\" ..."));
    }

    pub fn handle_msg(&mut self, msg: AppMsg) -> Flow {
        match msg {
            AppMsg::SearchDone {
                ticket,
                query,
                result,
            } => {
                if self.loader.finish(JobKind::Search, ticket) {
                    self.search_done(&query, result);
                }
            }
            AppMsg::CoverDone {
                ticket,
                track_id,
                art,
            } => self.cover_done(ticket, &track_id, art),
            AppMsg::LyricsDone {
                ticket,
                track_id,
                result,
            } => self.lyrics_done(ticket, &track_id, result),
            AppMsg::TrackEnded { generation } => {
                let results = self.app.results.clone();
                let outcome = self.playback.on_track_end(generation, &results);
                self.settle(outcome, PLAY_FAILED);
            }
            AppMsg::Control(cmd) => return self.control(cmd),
        }
        Flow::Continue
    }

    fn search_done(&mut self, query: &str, result: Result<Vec<Track>, String>) {
        match result {
            Ok(tracks) if tracks.is_empty() => {
                self.app.set_results(tracks);
                self.screen
                    .set_status(format!("No results for \"{query}\"."));
            }
            Ok(tracks) => {
                let n = tracks.len();
                self.app.set_results(tracks);
                self.screen
                    .set_status(format!("{n} results for \"{query}\"."));
            }
            Err(e) => self.screen.set_status(format!("Search failed: {e}")),
        }
    }

    /// `true` when a fetch result still belongs to the loaded track.
    fn is_for_loaded(&self, track_id: &str) -> bool {
        self.playback
            .active()
            .is_some_and(|a| a.track.id == track_id)
    }

    fn cover_done(&mut self, ticket: Ticket, track_id: &str, art: CoverArt) {
        if !self.loader.finish(JobKind::Cover, ticket) || !self.is_for_loaded(track_id) {
            debug!(track_id, "stale cover ignored");
            return;
        }
        self.screen.set_cover(Some(track_id), art);
    }

    fn lyrics_done(&mut self, ticket: Ticket, track_id: &str, result: Result<LoadedLyrics, String>) {
        if !self.loader.finish(JobKind::Lyrics, ticket) || !self.is_for_loaded(track_id) {
            debug!(track_id, "stale lyrics ignored");
            return;
        }
        match result {
            Ok(loaded) if !loaded.doc.is_empty() => {
                self.screen
                    .set_lyrics(format!("Lyrics ({})", loaded.provider), loaded.doc.plain.clone());
                self.progress.reset();
                self.lyrics = Some(loaded.doc);
            }
            Ok(_) => self.screen.lyrics_message(NO_LYRICS),
            Err(e) => self.screen.lyrics_message(&e),
        }
    }

    fn control(&mut self, cmd: ControlCmd) -> Flow {
        match cmd {
            ControlCmd::Quit => return Flow::Quit,
            ControlCmd::Play => {
                if self.playback.state() != PlaybackState::Playing {
                    self.toggle_loaded();
                }
            }
            ControlCmd::Pause => {
                if self.playback.state() == PlaybackState::Playing {
                    self.toggle_loaded();
                }
            }
            ControlCmd::PlayPause => self.toggle_loaded(),
            ControlCmd::Stop => self.stop(),
            ControlCmd::Next => self.skip(1),
            ControlCmd::Prev => self.skip(-1),
        }
        Flow::Continue
    }

    /// Run whichever loops are due.
    pub fn tick(&mut self, now: Instant) {
        if self.progress_timer.poll(now) {
            self.tick_progress();
        }
        if self.visualizer_timer.poll(now) {
            self.tick_visualizer();
        }
    }

    pub fn tick_progress(&mut self) {
        let tick = self.progress.tick(
            self.playback.player(),
            self.playback.is_active(),
            self.lyrics.as_ref(),
        );
        self.screen.set_progress(tick.view);
        if let Some(line) = tick.lyric {
            self.screen.highlight_lyric(line);
        }
    }

    pub fn tick_visualizer(&mut self) {
        if self.playback.state() != PlaybackState::Playing {
            return;
        }
        self.visualizer
            .tick(&self.energy, self.playback.player(), self.playback.volume());
        self.screen
            .set_energy(self.visualizer.trace(), self.visualizer.heights());
    }
}
