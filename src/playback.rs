//! Playback Controller: the session state machine (Idle, Playing, Paused)
//! and every transport intent.

mod controller;
mod error;
mod session;

pub use controller::{PlaybackController, Transition};
pub use error::PlaybackError;
pub use session::{ActiveTrack, PlaybackState, Session};
