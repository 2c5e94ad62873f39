use tracing::trace;

use crate::lyrics::LyricsDoc;
use crate::player::{PlayerBackend, TimeInfo};

pub const IDLE_LABEL: &str = "00:00 / 00:00";
const UNKNOWN_CLOCK: &str = "--:--";

/// What the progress widget shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub percent: f64,
    pub label: String,
}

impl ProgressView {
    pub fn idle() -> Self {
        Self {
            percent: 0.0,
            label: IDLE_LABEL.to_string(),
        }
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::idle()
    }
}

/// Percent from the backend, or position/duration when it is missing.
pub fn derive_percent(info: &TimeInfo) -> Option<f64> {
    let pct = match (info.percent, info.position, info.duration) {
        (Some(p), _, _) => p,
        (None, Some(pos), Some(dur)) if dur > 0.0 => pos / dur * 100.0,
        _ => return None,
    };
    pct.is_finite().then(|| pct.clamp(0.0, 100.0))
}

/// Render a time sample. Both clocks switch to `h:mm:ss` once the duration
/// reaches an hour.
pub fn progress_view(info: &TimeInfo) -> ProgressView {
    let info = info.normalized();
    let position = info.position.filter(|p| p.is_finite()).unwrap_or(0.0).max(0.0);
    let duration = info.duration.filter(|d| d.is_finite() && *d > 0.0);
    let hours = duration.is_some_and(|d| d >= 3600.0);

    let total = duration
        .map(|d| clock(d, hours))
        .unwrap_or_else(|| UNKNOWN_CLOCK.to_string());
    ProgressView {
        percent: derive_percent(&info).unwrap_or(0.0),
        label: format!("{} / {}", clock(position, hours), total),
    }
}

fn clock(seconds: f64, hours: bool) -> String {
    let secs = seconds as u64;
    if hours {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Result of one progress tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTick {
    pub view: ProgressView,
    /// New highlighted lyric line, only when it changed since the last tick.
    pub lyric: Option<Option<usize>>,
}

/// Progress loop state: remembers the last highlighted lyric so the view is
/// only re-rendered on change.
#[derive(Debug, Default)]
pub struct ProgressDriver {
    last_lyric: Option<usize>,
}

impl ProgressDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the highlight, e.g. when the lyrics are replaced.
    pub fn reset(&mut self) {
        self.last_lyric = None;
    }

    pub fn last_lyric(&self) -> Option<usize> {
        self.last_lyric
    }

    pub fn tick(
        &mut self,
        player: &dyn PlayerBackend,
        active: bool,
        lyrics: Option<&LyricsDoc>,
    ) -> ProgressTick {
        if !active || !player.is_available() {
            return ProgressTick {
                view: ProgressView::idle(),
                lyric: None,
            };
        }

        let info = player.time_info().normalized();
        let view = progress_view(&info);

        let mut lyric = None;
        if let (Some(doc), Some(pos)) = (lyrics.filter(|d| d.is_synced()), info.position) {
            let idx = doc.active_index(pos);
            if idx != self.last_lyric {
                trace!(?idx, pos, "lyric highlight moved");
                self.last_lyric = idx;
                lyric = Some(idx);
            }
        }
        ProgressTick { view, lyric }
    }
}
