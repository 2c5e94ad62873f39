use thiserror::Error;

use crate::player::PlayerError;

/// Why a transport action did not happen. None of these are fatal.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("player unavailable: {0}")]
    BackendUnavailable(String),
    #[error("nothing is playing")]
    NoActiveTrack,
    #[error("track has no playable URL")]
    NoPlayableUrl,
    #[error("no track selected")]
    NoSelection,
    #[error("player command failed: {0}")]
    Transient(PlayerError),
}

impl From<PlayerError> for PlaybackError {
    fn from(e: PlayerError) -> Self {
        match e {
            PlayerError::Unavailable(reason) => Self::BackendUnavailable(reason),
            other => Self::Transient(other),
        }
    }
}
