//! Player handle over an external playback engine.
//!
//! `PlayerBackend` is the contract; `MpvPlayer` drives a real `mpv` process
//! and `UnavailablePlayer` stands in when it cannot be started.

#[cfg(test)]
pub(crate) mod fake;
mod ipc;
mod mpv;
mod types;
mod unavailable;

use tracing::warn;

use crate::config::PlayerSettings;

pub use mpv::MpvPlayer;
pub use types::*;
pub use unavailable::UnavailablePlayer;

/// Start `mpv`, or fall back to a disabled backend carrying the reason.
pub fn open(settings: &PlayerSettings) -> Box<dyn PlayerBackend> {
    match MpvPlayer::spawn(settings) {
        Ok(p) => Box::new(p),
        Err(e) => {
            warn!(error = %e, "player disabled");
            Box::new(UnavailablePlayer::new(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests;
