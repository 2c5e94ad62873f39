//! Application module: the browse model used by the TUI and coordinator.
//!
//! The `App` model lives in `app::model` and holds the query input, the
//! current search results, the cursor and the device picker.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
