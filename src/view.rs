//! Widget state the core writes to and the renderer reads from.
//!
//! Every setter is fire-and-forget: the core never reads a value back to
//! make a decision.

use crate::catalog::Track;
use crate::cover::CoverArt;
use crate::driver::{EnergyTrace, ProgressView, render_bars};

pub const PLAY_LABEL: &str = "Play";
pub const PAUSE_LABEL: &str = "Pause";
pub const NO_LYRICS: &str = "No lyrics";

#[derive(Debug, Clone, PartialEq)]
pub struct LyricsPane {
    pub title: String,
    pub lines: Vec<String>,
    pub highlighted: Option<usize>,
}

impl LyricsPane {
    fn message(text: &str) -> Self {
        Self {
            title: "Lyrics".to_string(),
            lines: vec![text.to_string()],
            highlighted: None,
        }
    }
}

impl Default for LyricsPane {
    fn default() -> Self {
        Self::message(NO_LYRICS)
    }
}

#[derive(Debug, Clone)]
pub struct Screen {
    pub status: String,
    pub now_playing: Track,
    pub progress: ProgressView,
    pub volume_label: String,
    /// Rolling energy trace in percent, oldest first.
    pub energy: Vec<u64>,
    pub bars: Vec<String>,
    pub cover: CoverArt,
    /// Track the displayed cover belongs to.
    pub cover_track: Option<String>,
    pub lyrics: LyricsPane,
    pub transport_label: &'static str,
    /// Cleared when no player backend could be started.
    pub controls_enabled: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            status: String::new(),
            now_playing: Track::placeholder(),
            progress: ProgressView::idle(),
            volume_label: String::new(),
            energy: Vec::new(),
            bars: render_bars(&[]),
            cover: CoverArt::none(),
            cover_track: None,
            lyrics: LyricsPane::default(),
            transport_label: PLAY_LABEL,
            controls_enabled: true,
        }
    }
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    pub fn set_now_playing(&mut self, track: Option<&Track>) {
        self.now_playing = track.cloned().unwrap_or_else(Track::placeholder);
    }

    pub fn set_progress(&mut self, view: ProgressView) {
        self.progress = view;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume_label = format!("Volume: {volume}%");
    }

    pub fn set_energy(&mut self, trace: &EnergyTrace, heights: &[u8]) {
        self.energy = trace.as_percent();
        self.bars = render_bars(heights);
    }

    pub fn clear_energy(&mut self) {
        self.energy.clear();
        self.bars = render_bars(&[]);
    }

    pub fn set_cover(&mut self, track_id: Option<&str>, art: CoverArt) {
        self.cover_track = track_id.map(str::to_string);
        self.cover = art;
    }

    pub fn reset_cover(&mut self) {
        self.set_cover(None, CoverArt::none());
    }

    pub fn set_lyrics(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.lyrics = LyricsPane {
            title: title.into(),
            lines,
            highlighted: None,
        };
    }

    pub fn lyrics_message(&mut self, text: &str) {
        self.lyrics = LyricsPane::message(text);
    }

    pub fn highlight_lyric(&mut self, index: Option<usize>) {
        self.lyrics.highlighted = index.filter(|i| *i < self.lyrics.lines.len());
    }

    pub fn reset_lyrics(&mut self) {
        self.lyrics = LyricsPane::default();
    }

    pub fn set_transport(&mut self, playing: bool) {
        self.transport_label = if playing { PAUSE_LABEL } else { PLAY_LABEL };
    }

    pub fn disable_controls(&mut self) {
        self.controls_enabled = false;
    }
}
