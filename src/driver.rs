//! Progress and visualizer loops.
//!
//! Both are plain state machines ticked by the event loop through an
//! [`Interval`]; they read the player and energy source and return values
//! for the view. Reads never fail: a bad sample degrades to a placeholder for
//! that tick only.

mod progress;
mod timer;
mod visualizer;

pub use progress::*;
pub use timer::Interval;
pub use visualizer::*;

#[cfg(test)]
mod tests;
