use std::time::Duration;

use anyhow::Context;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{MISSING, Track, UNTITLED, http_agent};
use crate::config::LyricsSettings;

const LRCLIB_URL: &str = "https://lrclib.net/api/get";
const LYRICS_OVH_URL: &str = "https://api.lyrics.ovh/v1";

#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("not enough track metadata to look up lyrics")]
    MissingMetadata,
    #[error("no lyrics found")]
    NotFound,
    #[error("lyrics lookup failed: {0}")]
    Failed(String),
}

/// Metadata handed to every provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricsQuery {
    pub track_id: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<u64>,
}

impl LyricsQuery {
    pub fn for_track(track: &Track) -> Self {
        let known = |s: &str| {
            let s = s.trim();
            (!s.is_empty() && s != MISSING && s != UNTITLED).then(|| s.to_string())
        };
        Self {
            track_id: track.id.clone(),
            title: known(&track.title),
            artist: known(&track.artist),
            album: known(&track.album),
            duration: track.duration_secs(),
        }
    }
}

/// Raw lyric text and the provider that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedLyrics {
    pub provider: String,
    pub text: String,
}

pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &'static str;
    /// `Ok(None)` means "this provider has nothing"; errors are transport
    /// failures.
    fn fetch(&self, query: &LyricsQuery) -> anyhow::Result<Option<String>>;
}

pub struct Lrclib {
    agent: ureq::Agent,
}

impl LyricsProvider for Lrclib {
    fn name(&self) -> &'static str {
        "lrclib"
    }

    fn fetch(&self, query: &LyricsQuery) -> anyhow::Result<Option<String>> {
        let (Some(title), Some(artist)) = (&query.title, &query.artist) else {
            return Ok(None);
        };
        let mut request = self
            .agent
            .get(LRCLIB_URL)
            .query("track_name", title)
            .query("artist_name", artist);
        if let Some(album) = &query.album {
            request = request.query("album_name", album);
        }
        if let Some(duration) = query.duration {
            request = request.query("duration", duration.to_string());
        }

        let body = match request.call() {
            Ok(mut resp) => resp.body_mut().read_to_string().context("reading lrclib reply")?,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(e) => return Err(e).context("lrclib request failed"),
        };
        let json: Value = serde_json::from_str(&body).context("lrclib reply is not JSON")?;
        Ok(lrclib_text(&json))
    }
}

/// Prefer synced LRC over plain text. Instrumentals have neither.
pub fn lrclib_text(json: &Value) -> Option<String> {
    ["syncedLyrics", "plainLyrics"]
        .iter()
        .filter_map(|k| json.get(*k).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

pub struct LyricsOvh {
    agent: ureq::Agent,
}

impl LyricsProvider for LyricsOvh {
    fn name(&self) -> &'static str {
        "lyrics-ovh"
    }

    fn fetch(&self, query: &LyricsQuery) -> anyhow::Result<Option<String>> {
        let (Some(title), Some(artist)) = (&query.title, &query.artist) else {
            return Ok(None);
        };
        let url = format!(
            "{LYRICS_OVH_URL}/{}/{}",
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );
        let body = match self.agent.get(&url).call() {
            Ok(mut resp) => resp.body_mut().read_to_string().context("reading lyrics.ovh reply")?,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(e) => return Err(e).context("lyrics.ovh request failed"),
        };
        let json: Value = serde_json::from_str(&body).context("lyrics.ovh reply is not JSON")?;
        Ok(ovh_text(&json))
    }
}

pub fn ovh_text(json: &Value) -> Option<String> {
    json.get("lyrics")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Priority-ordered providers; the first non-empty answer wins.
pub struct LyricsChain {
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsChain {
    pub fn new(providers: Vec<Box<dyn LyricsProvider>>) -> Self {
        Self { providers }
    }

    /// Build the chain named in the settings. Unknown names are skipped.
    pub fn from_settings(settings: &LyricsSettings) -> Self {
        let agent = http_agent(Duration::from_secs(settings.timeout_secs));
        let providers = settings
            .providers
            .iter()
            .filter_map(|name| -> Option<Box<dyn LyricsProvider>> {
                match name.as_str() {
                    "lrclib" => Some(Box::new(Lrclib {
                        agent: agent.clone(),
                    })),
                    "lyrics-ovh" => Some(Box::new(LyricsOvh {
                        agent: agent.clone(),
                    })),
                    other => {
                        warn!(provider = other, "unknown lyrics provider skipped");
                        None
                    }
                }
            })
            .collect();
        Self { providers }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn fetch(&self, query: &LyricsQuery) -> Result<FetchedLyrics, LyricsError> {
        if query.title.is_none() {
            return Err(LyricsError::MissingMetadata);
        }

        let mut failures = Vec::new();
        for provider in &self.providers {
            match provider.fetch(query) {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    debug!(provider = provider.name(), id = %query.track_id, "lyrics found");
                    return Ok(FetchedLyrics {
                        provider: provider.name().to_string(),
                        text,
                    });
                }
                Ok(_) => debug!(provider = provider.name(), "no lyrics from provider"),
                Err(e) => {
                    warn!(provider = provider.name(), error = %format!("{e:#}"), "lyrics provider failed");
                    failures.push(format!("{}: {e}", provider.name()));
                }
            }
        }

        if failures.is_empty() {
            Err(LyricsError::NotFound)
        } else {
            Err(LyricsError::Failed(failures.join("; ")))
        }
    }
}
