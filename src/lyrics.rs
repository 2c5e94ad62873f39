//! Lyrics: timestamp parsing, active-line selection and the provider chain.

mod parse;
mod provider;

pub use parse::{LyricsDoc, SyncedLine, active_index};
pub use provider::*;
