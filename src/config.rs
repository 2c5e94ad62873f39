//! Settings for every subsystem, read from an optional TOML file and
//! `SINTONIA__*` environment variables on top of built-in defaults.

mod load;
mod schema;

pub use load::{KNOWN_LYRICS_PROVIDERS, default_log_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
pub(crate) mod env_guard;
