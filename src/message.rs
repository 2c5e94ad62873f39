//! Messages handed to the event loop from worker and backend threads.

use crate::catalog::Track;
use crate::cover::CoverArt;
use crate::lyrics::LyricsDoc;
use crate::mpris::ControlCmd;

/// Ticket identifying one request; only the latest ticket of a kind applies.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLyrics {
    pub provider: String,
    pub doc: LyricsDoc,
}

#[derive(Debug)]
pub enum AppMsg {
    SearchDone {
        ticket: Ticket,
        query: String,
        result: Result<Vec<Track>, String>,
    },
    CoverDone {
        ticket: Ticket,
        track_id: String,
        art: CoverArt,
    },
    LyricsDone {
        ticket: Ticket,
        track_id: String,
        result: Result<LoadedLyrics, String>,
    },
    /// Natural end of a track, re-dispatched from the player thread and
    /// stamped with the play generation current when it fired.
    TrackEnded { generation: u64 },
    Control(ControlCmd),
}
