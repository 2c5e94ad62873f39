//! Line-delimited JSON IPC client for `mpv --input-ipc-server`.
//!
//! Requests carry a `request_id`; a reader thread routes each reply back to
//! the waiting caller and hands every event line to an event handler.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::{debug, warn};

use super::types::PlayerError;

/// Reply to one request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply {
    pub error: String,
    pub data: Value,
}

/// One decoded line from the socket.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Incoming {
    Reply { id: u64, reply: Reply },
    Event(Value),
}

type Pending = Arc<Mutex<HashMap<u64, Sender<Reply>>>>;

pub(crate) struct IpcClient {
    writer: Mutex<UnixStream>,
    pending: Pending,
    next_id: AtomicU64,
    timeout: Duration,
}

impl IpcClient {
    /// Connect to `path` and start the reader thread. `on_event` runs on that
    /// thread for every event line.
    pub fn connect<F>(path: &Path, timeout: Duration, on_event: F) -> Result<Self, PlayerError>
    where
        F: Fn(&Value) + Send + 'static,
    {
        let stream = UnixStream::connect(path)?;
        let reader = stream.try_clone()?;
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));

        let pending_for_thread = pending.clone();
        thread::Builder::new()
            .name("mpv-ipc".to_string())
            .spawn(move || {
                for line in BufReader::new(reader).lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    match parse_line(&line) {
                        Some(Incoming::Reply { id, reply }) => {
                            let waiter = pending_for_thread
                                .lock()
                                .ok()
                                .and_then(|mut p| p.remove(&id));
                            if let Some(tx) = waiter {
                                let _ = tx.send(reply);
                            }
                        }
                        Some(Incoming::Event(ev)) => on_event(&ev),
                        None => debug!(%line, "ignoring unparseable mpv line"),
                    }
                }
                debug!("mpv ipc reader finished");
            })?;

        Ok(Self {
            writer: Mutex::new(stream),
            pending,
            next_id: AtomicU64::new(1),
            timeout,
        })
    }

    /// Send a command and wait for its reply data.
    pub fn command(&self, args: &[Value]) -> Result<Value, PlayerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel();
        if let Ok(mut p) = self.pending.lock() {
            p.insert(id, tx);
        }

        let line = encode_command(id, args);
        let written = match self.writer.lock() {
            Ok(mut w) => w.write_all(line.as_bytes()).and_then(|_| w.flush()),
            Err(_) => Err(std::io::Error::other("ipc writer poisoned")),
        };
        if let Err(e) = written {
            self.forget(id);
            return Err(e.into());
        }

        match rx.recv_timeout(self.timeout) {
            Ok(reply) if reply.error == "success" => Ok(reply.data),
            Ok(reply) => Err(PlayerError::Command(reply.error)),
            Err(_) => {
                self.forget(id);
                warn!(?args, "mpv command timed out");
                Err(PlayerError::Timeout)
            }
        }
    }

    fn forget(&self, id: u64) {
        if let Ok(mut p) = self.pending.lock() {
            p.remove(&id);
        }
    }
}

pub(crate) fn encode_command(id: u64, args: &[Value]) -> String {
    let mut line = json!({ "command": args, "request_id": id }).to_string();
    line.push('\n');
    line
}

pub(crate) fn parse_line(line: &str) -> Option<Incoming> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    if value.get("event").is_some() {
        return Some(Incoming::Event(value));
    }
    let id = value.get("request_id")?.as_u64()?;
    let error = value
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("success")
        .to_string();
    let data = value.get("data").cloned().unwrap_or(Value::Null);
    Some(Incoming::Reply {
        id,
        reply: Reply { error, data },
    })
}
