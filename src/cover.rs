//! Cover art: fetch by URL, square-crop, and turn into terminal art.

mod art;

use std::time::Duration;

use anyhow::Context;

use crate::catalog::http_agent;

pub use art::*;

/// Fetches raw image bytes. Swapped for a canned source in tests.
pub trait CoverFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>>;
}

pub struct HttpCover {
    agent: ureq::Agent,
}

impl HttpCover {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: http_agent(timeout),
        }
    }
}

impl CoverFetcher for HttpCover {
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        self.agent
            .get(url)
            .call()
            .with_context(|| format!("cover request to {url} failed"))?
            .body_mut()
            .read_to_vec()
            .context("reading cover body")
    }
}

#[cfg(test)]
mod tests;
