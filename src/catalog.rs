//! Online catalog search.
//!
//! `Track` is the normalized record for one search result; `Catalog` is the
//! search backend seam and `HttpCatalog` the default HTTP implementation.

mod client;
mod model;

pub use client::{Catalog, HttpCatalog, http_agent};
pub use model::*;
