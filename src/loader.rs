//! Off-loop fetches: search, cover and lyrics.
//!
//! Each kind has at most one live request. Starting a new one cancels the
//! previous (its worker stops at the next check and never reports) and bumps
//! the ticket, so a late reply from a superseded request is recognisably
//! stale when it reaches the loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::{Catalog, HttpCatalog};
use crate::config::{CoverStyle, Settings};
use crate::cover::{CoverArt, CoverFetcher, HttpCover, render_cover};
use crate::lyrics::{LyricsChain, LyricsDoc, LyricsQuery};
use crate::message::{AppMsg, LoadedLyrics, Ticket};

/// Network collaborators used by the workers.
#[derive(Clone)]
pub struct Sources {
    pub catalog: Arc<dyn Catalog>,
    pub lyrics: Arc<LyricsChain>,
    pub covers: Arc<dyn CoverFetcher>,
}

impl Sources {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            catalog: Arc::new(HttpCatalog::new(&settings.catalog)),
            lyrics: Arc::new(LyricsChain::from_settings(&settings.lyrics)),
            covers: Arc::new(HttpCover::new(Duration::from_secs(
                settings.catalog.cover_timeout_secs,
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JobKind {
    Search,
    Cover,
    Lyrics,
}

impl JobKind {
    fn thread_name(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Cover => "cover",
            Self::Lyrics => "lyrics",
        }
    }
}

struct Job {
    ticket: Ticket,
    cancel: Arc<AtomicBool>,
}

pub struct Loader {
    sources: Sources,
    tx: Sender<AppMsg>,
    limit: usize,
    cover_style: CoverStyle,
    next_ticket: Ticket,
    jobs: HashMap<JobKind, Job>,
}

impl Loader {
    pub fn new(sources: Sources, tx: Sender<AppMsg>, limit: usize, cover_style: CoverStyle) -> Self {
        Self {
            sources,
            tx,
            limit,
            cover_style,
            next_ticket: 1,
            jobs: HashMap::new(),
        }
    }

    /// Latest ticket issued for `kind`, while it is still outstanding.
    pub fn current(&self, kind: JobKind) -> Option<Ticket> {
        self.jobs.get(&kind).map(|j| j.ticket)
    }

    pub fn is_current(&self, kind: JobKind, ticket: Ticket) -> bool {
        self.current(kind) == Some(ticket)
    }

    /// Accept a reply: `true` (and the job is retired) only for the latest
    /// ticket of its kind.
    pub fn finish(&mut self, kind: JobKind, ticket: Ticket) -> bool {
        if self.is_current(kind, ticket) {
            self.jobs.remove(&kind);
            true
        } else {
            debug!(?kind, ticket, "stale result discarded");
            false
        }
    }

    pub fn cancel(&mut self, kind: JobKind) {
        if let Some(job) = self.jobs.remove(&kind) {
            job.cancel.store(true, Ordering::Relaxed);
            debug!(?kind, ticket = job.ticket, "request cancelled");
        }
    }

    pub fn cancel_all(&mut self) {
        for kind in [JobKind::Search, JobKind::Cover, JobKind::Lyrics] {
            self.cancel(kind);
        }
    }

    fn begin(&mut self, kind: JobKind) -> (Ticket, Arc<AtomicBool>) {
        self.cancel(kind);
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let cancel = Arc::new(AtomicBool::new(false));
        self.jobs.insert(
            kind,
            Job {
                ticket,
                cancel: cancel.clone(),
            },
        );
        (ticket, cancel)
    }

    fn spawn<F>(&self, kind: JobKind, ticket: Ticket, cancel: Arc<AtomicBool>, work: F)
    where
        F: FnOnce() -> Option<AppMsg> + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(kind.thread_name().to_string())
            .spawn(move || {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                let Some(msg) = work() else {
                    return;
                };
                if cancel.load(Ordering::Relaxed) {
                    debug!(?kind, ticket, "dropping reply of cancelled request");
                    return;
                }
                let _ = tx.send(msg);
            });
        if let Err(e) = spawned {
            warn!(?kind, error = %e, "could not start worker thread");
        }
    }

    pub fn search(&mut self, query: &str) -> Ticket {
        let (ticket, cancel) = self.begin(JobKind::Search);
        let catalog = self.sources.catalog.clone();
        let limit = self.limit;
        let query = query.to_string();
        debug!(ticket, %query, "search requested");
        self.spawn(JobKind::Search, ticket, cancel, move || {
            let result = catalog.search(&query, limit).map_err(|e| {
                warn!(error = %format!("{e:#}"), "search failed");
                format!("{e:#}")
            });
            Some(AppMsg::SearchDone {
                ticket,
                query,
                result,
            })
        });
        ticket
    }

    pub fn cover(&mut self, track_id: &str, url: &str) -> Ticket {
        let (ticket, cancel) = self.begin(JobKind::Cover);
        let covers = self.sources.covers.clone();
        let style = self.cover_style;
        let track_id = track_id.to_string();
        let url = url.to_string();
        self.spawn(JobKind::Cover, ticket, cancel, move || {
            let art = match covers.fetch(&url) {
                Ok(bytes) => render_cover(&bytes, style),
                Err(e) => {
                    warn!(error = %format!("{e:#}"), "cover fetch failed");
                    CoverArt::Text(format!("Cover error: {e}"))
                }
            };
            Some(AppMsg::CoverDone {
                ticket,
                track_id,
                art,
            })
        });
        ticket
    }

    pub fn lyrics(&mut self, query: LyricsQuery) -> Ticket {
        let (ticket, cancel) = self.begin(JobKind::Lyrics);
        let chain = self.sources.lyrics.clone();
        self.spawn(JobKind::Lyrics, ticket, cancel, move || {
            let result = chain
                .fetch(&query)
                .map(|found| LoadedLyrics {
                    provider: found.provider,
                    doc: LyricsDoc::parse(&found.text),
                })
                .map_err(|e| e.to_string());
            Some(AppMsg::LyricsDone {
                ticket,
                track_id: query.track_id,
                result,
            })
        });
        ticket
    }
}

#[cfg(test)]
pub(crate) mod fake;
