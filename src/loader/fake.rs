//! Canned network collaborators for tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use anyhow::bail;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use super::Sources;
use crate::catalog::{Catalog, Track};
use crate::cover::CoverFetcher;
use crate::lyrics::{LyricsChain, LyricsProvider, LyricsQuery};

pub fn track(id: &str) -> Track {
    Track {
        title: format!("Song {id}"),
        artist: "Band".into(),
        album: "Album".into(),
        duration: "3:00".into(),
        id: id.into(),
        thumbnail_url: format!("https://img.test/{id}.png"),
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub tracks: Vec<Track>,
    pub offline: bool,
}

impl Catalog for FakeCatalog {
    fn search(&self, _query: &str, limit: usize) -> anyhow::Result<Vec<Track>> {
        if self.offline {
            bail!("catalog offline");
        }
        Ok(self.tracks.iter().take(limit).cloned().collect())
    }
}

/// Serves a tiny PNG for every URL. A URL can be held back with `gate`
/// until the returned sender fires or is dropped.
#[derive(Default)]
pub struct FakeCover {
    gates: Mutex<HashMap<String, Receiver<()>>>,
}

impl FakeCover {
    pub fn gate(&self, url: &str) -> Sender<()> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut gates) = self.gates.lock() {
            gates.insert(url.to_string(), rx);
        }
        tx
    }
}

impl CoverFetcher for FakeCover {
    fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let gate = self.gates.lock().ok().and_then(|mut g| g.remove(url));
        if let Some(rx) = gate {
            let _ = rx.recv();
        }
        if url.contains("broken") {
            bail!("404 for {url}");
        }
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 40, 40])))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }
}

/// Answers with fixed LRC text for every titled query.
pub struct StaticLyrics(pub &'static str);

impl LyricsProvider for StaticLyrics {
    fn name(&self) -> &'static str {
        "static"
    }

    fn fetch(&self, _query: &LyricsQuery) -> anyhow::Result<Option<String>> {
        Ok(Some(self.0.to_string()))
    }
}

pub const LRC: &str = "[00:01.00]one\n[00:05.00]two\n[00:09.00]three";

pub fn sources(tracks: Vec<Track>) -> (Sources, Arc<FakeCover>) {
    let covers = Arc::new(FakeCover::default());
    let sources = Sources {
        catalog: Arc::new(FakeCatalog {
            tracks,
            offline: false,
        }),
        lyrics: Arc::new(LyricsChain::new(vec![Box::new(StaticLyrics(LRC))])),
        covers: covers.clone(),
    };
    (sources, covers)
}
