//! `mpv` child process driven over its JSON IPC socket.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::PlayerSettings;

use super::ipc::IpcClient;
use super::types::{
    AudioDevice, EndReason, PlayerBackend, PlayerError, TimeInfo, bitrate_energy,
};

const NORMALIZER_FILTER: &str = "lavfi=[loudnorm]";

type Notifier = Arc<Mutex<Option<Box<dyn Fn() + Send>>>>;

pub struct MpvPlayer {
    child: Child,
    ipc: IpcClient,
    socket_path: PathBuf,
    notify: Notifier,
    last_log: Arc<Mutex<Option<String>>>,
    closed: bool,
}

impl MpvPlayer {
    /// Spawn `mpv` in idle mode and connect to its IPC socket.
    pub fn spawn(settings: &PlayerSettings) -> Result<Self, PlayerError> {
        let socket_path =
            std::env::temp_dir().join(format!("sintonia-mpv-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&socket_path);

        let mut child = Command::new(&settings.mpv_path)
            .arg("--idle=yes")
            .arg("--no-video")
            .arg("--no-terminal")
            .arg("--ytdl=yes")
            .arg(format!("--input-ipc-server={}", socket_path.display()))
            .args(&settings.extra_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                PlayerError::Unavailable(format!(
                    "mpv is not available ({}): {e}. Install mpv.",
                    settings.mpv_path
                ))
            })?;

        let notify: Notifier = Arc::new(Mutex::new(None));
        let last_log = Arc::new(Mutex::new(None));

        let deadline = Instant::now() + Duration::from_millis(settings.connect_timeout_ms);
        let ipc_timeout = Duration::from_millis(settings.ipc_timeout_ms);
        let ipc = loop {
            let notify_for_reader = notify.clone();
            let log_for_reader = last_log.clone();
            match IpcClient::connect(&socket_path, ipc_timeout, move |ev| {
                handle_event(ev, &notify_for_reader, &log_for_reader)
            }) {
                Ok(ipc) => break ipc,
                Err(e) => {
                    if let Ok(Some(status)) = child.try_wait() {
                        return Err(PlayerError::Unavailable(format!(
                            "mpv exited during startup ({status})"
                        )));
                    }
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(PlayerError::Unavailable(format!(
                            "could not connect to mpv: {e}"
                        )));
                    }
                    thread::sleep(Duration::from_millis(50));
                }
            }
        };

        let player = Self {
            child,
            ipc,
            socket_path,
            notify,
            last_log,
            closed: false,
        };
        if let Err(e) = player.ipc.command(&[json!("request_log_messages"), json!("warn")]) {
            debug!(error = %e, "mpv log messages unavailable");
        }
        info!(socket = %player.socket_path.display(), "mpv started");
        Ok(player)
    }

    fn get_property(&self, name: &str) -> Result<Value, PlayerError> {
        self.ipc.command(&[json!("get_property"), json!(name)])
    }

    fn set_property(&self, name: &str, value: Value) -> Result<(), PlayerError> {
        self.ipc
            .command(&[json!("set_property"), json!(name), value])
            .map(|_| ())
    }

    fn get_f64(&self, name: &str) -> Option<f64> {
        self.get_property(name).ok().and_then(|v| v.as_f64())
    }
}

impl PlayerBackend for MpvPlayer {
    fn is_available(&self) -> bool {
        !self.closed
    }

    fn last_error(&self) -> Option<String> {
        None
    }

    fn last_log(&self) -> Option<String> {
        self.last_log.lock().ok().and_then(|l| l.clone())
    }

    fn play(&mut self, url: &str) -> Result<(), PlayerError> {
        if let Ok(mut l) = self.last_log.lock() {
            *l = None;
        }
        self.ipc
            .command(&[json!("loadfile"), json!(url), json!("replace")])?;
        self.set_property("pause", json!(false))
    }

    fn toggle_pause(&mut self) -> Result<bool, PlayerError> {
        let paused = self.get_property("pause")?.as_bool().unwrap_or(false);
        self.set_property("pause", json!(!paused))?;
        Ok(paused)
    }

    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.ipc
            .command(&[json!("seek"), json!(seconds), json!("relative")])
            .map(|_| ())
    }

    fn set_volume(&mut self, volume: u8) -> Result<u8, PlayerError> {
        let volume = volume.min(100);
        self.set_property("volume", json!(volume))?;
        self.volume()
    }

    fn volume(&self) -> Result<u8, PlayerError> {
        let v = self
            .get_property("volume")?
            .as_f64()
            .ok_or_else(|| PlayerError::Protocol("volume is not a number".into()))?;
        Ok(v.round().clamp(0.0, 100.0) as u8)
    }

    fn set_normalizer(&mut self, enabled: bool) -> Result<(), PlayerError> {
        let filter = if enabled { NORMALIZER_FILTER } else { "" };
        self.set_property("af", json!(filter))
    }

    fn list_audio_devices(&self) -> Result<Vec<AudioDevice>, PlayerError> {
        match self.get_property("audio-device-list") {
            Ok(data) => Ok(parse_devices(&data)),
            // Some builds do not expose the list.
            Err(PlayerError::Command(e)) => {
                debug!(error = %e, "audio-device-list unavailable");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn set_audio_device(&mut self, name: &str) -> Result<(), PlayerError> {
        self.set_property("audio-device", json!(name))
    }

    fn time_info(&self) -> TimeInfo {
        TimeInfo {
            position: self.get_f64("time-pos"),
            duration: self.get_f64("duration"),
            percent: self.get_f64("percent-pos"),
        }
        .normalized()
    }

    fn sample_energy(&self) -> Result<f64, PlayerError> {
        let bitrate = self.get_f64("audio-bitrate").unwrap_or(0.0);
        let volume = self.get_f64("volume").unwrap_or(50.0);
        Ok(bitrate_energy(bitrate, volume))
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.ipc.command(&[json!("stop")]).map(|_| ())
    }

    fn set_end_of_track_notifier(&mut self, notify: Box<dyn Fn() + Send>) {
        if let Ok(mut n) = self.notify.lock() {
            *n = Some(notify);
        }
    }

    fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let _ = self.ipc.command(&[json!("quit")]);
        if !matches!(self.child.try_wait(), Ok(Some(_))) {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.socket_path);
        info!("mpv stopped");
    }
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn handle_event(ev: &Value, notify: &Notifier, last_log: &Arc<Mutex<Option<String>>>) {
    match ev.get("event").and_then(Value::as_str) {
        Some("end-file") => match end_reason(ev) {
            EndReason::Eof => {
                debug!("track finished");
                if let Ok(n) = notify.lock() {
                    if let Some(cb) = n.as_ref() {
                        cb();
                    }
                }
            }
            EndReason::Error(msg) => {
                warn!(%msg, "track ended with error");
                if let Ok(mut l) = last_log.lock() {
                    *l = Some(format!("end-file error: {msg}"));
                }
            }
            EndReason::Other(reason) => debug!(%reason, "end-file ignored"),
        },
        Some("log-message") => {
            if let Some(line) = log_line(ev) {
                debug!(%line, "mpv log");
                if let Ok(mut l) = last_log.lock() {
                    *l = Some(line);
                }
            }
        }
        _ => {}
    }
}

/// Classify an `end-file` event. Only `eof` without an error is a natural end.
pub(crate) fn end_reason(ev: &Value) -> EndReason {
    let reason = ev.get("reason").and_then(Value::as_str).unwrap_or("unknown");
    let file_error = ev
        .get("file_error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let code = ev.get("error").and_then(Value::as_i64).filter(|c| *c != 0);

    if reason == "error" || file_error.is_some() || code.is_some() {
        let detail = file_error
            .map(str::to_string)
            .or_else(|| code.map(|c| format!("code {c}")))
            .unwrap_or_else(|| "unknown error".to_string());
        return EndReason::Error(format!("reason={reason}, {detail}"));
    }
    if reason == "eof" {
        EndReason::Eof
    } else {
        EndReason::Other(reason.to_string())
    }
}

/// Keep only warning/error log messages, formatted as `prefix: text`.
pub(crate) fn log_line(ev: &Value) -> Option<String> {
    let level = ev.get("level").and_then(Value::as_str)?;
    if !matches!(level, "error" | "fatal" | "warn") {
        return None;
    }
    let prefix = ev.get("prefix").and_then(Value::as_str).unwrap_or("mpv");
    let text = ev.get("text").and_then(Value::as_str)?.trim();
    Some(format!("{prefix}: {text}"))
}

pub(crate) fn parse_devices(data: &Value) -> Vec<AudioDevice> {
    data.as_array()
        .map(|list| {
            list.iter()
                .filter_map(|dev| {
                    let name = dev.get("name").and_then(Value::as_str)?.trim();
                    if name.is_empty() {
                        return None;
                    }
                    let description = dev
                        .get("description")
                        .and_then(Value::as_str)
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or(name);
                    Some(AudioDevice {
                        name: name.to_string(),
                        description: description.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
