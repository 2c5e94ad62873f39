//! MPRIS D-Bus surface so media keys and `playerctl` can drive playback.
//!
//! Method calls never touch playback state directly: each one is forwarded
//! to the event loop as [`AppMsg::Control`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use tracing::{debug, warn};
use zbus::{Connection, interface};
use zvariant::{OwnedValue, Value};

use crate::catalog::Track;
use crate::message::AppMsg;
use crate::playback::PlaybackState;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.sintonia";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// Metadata published for the loaded track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMeta {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub url: Option<String>,
    pub length_secs: Option<u64>,
}

impl TrackMeta {
    pub fn new(track: &Track, url: Option<String>) -> Self {
        Self {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            url,
            length_secs: track.duration_secs(),
        }
    }
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    track: Option<TrackMeta>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    pub fn set_track(&self, track: Option<TrackMeta>) {
        if let Ok(mut s) = self.state.lock() {
            s.track = track;
        }
    }
}

fn send(tx: &Sender<AppMsg>, cmd: ControlCmd) {
    debug!(?cmd, "mpris command");
    let _ = tx.send(AppMsg::Control(cmd));
}

struct RootIface {
    tx: Sender<AppMsg>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        send(&self.tx, ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "sintonia"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["https".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<AppMsg>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

/// `xesam`/`mpris` metadata map for the published track.
fn metadata_map(track: Option<&TrackMeta>) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();
    let Some(track) = track else {
        return map;
    };

    let mut put = |key: &str, value: Option<OwnedValue>| {
        if let Some(v) = value {
            map.insert(key.to_string(), v);
        }
    };
    put("xesam:title", owned(Value::from(track.title.clone())));
    put(
        "xesam:artist",
        owned(Value::from(vec![track.artist.clone()])),
    );
    put("xesam:album", owned(Value::from(track.album.clone())));
    if let Some(url) = &track.url {
        put("xesam:url", owned(Value::from(url.clone())));
    }
    if let Some(secs) = track.length_secs {
        let micros = i64::try_from(secs.saturating_mul(1_000_000)).unwrap_or(i64::MAX);
        put("mpris:length", owned(Value::from(micros)));
    }
    let object_id: String = track
        .id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if let Ok(path) = zvariant::ObjectPath::try_from(format!("{OBJECT_PATH}/track/t{object_id}")) {
        put("mpris:trackid", owned(Value::from(path)));
    }
    map
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        send(&self.tx, ControlCmd::Next);
    }

    fn previous(&self) {
        send(&self.tx, ControlCmd::Prev);
    }

    fn play(&self) {
        send(&self.tx, ControlCmd::Play);
    }

    fn pause(&self) {
        send(&self.tx, ControlCmd::Pause);
    }

    fn play_pause(&self) {
        send(&self.tx, ControlCmd::PlayPause);
    }

    fn stop(&self) {
        send(&self.tx, ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        s.playback.label()
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let Ok(s) = self.state.lock() else {
            return HashMap::new();
        };
        metadata_map(s.track.as_ref())
    }
}

/// Serve MPRIS on the session bus from a background thread. Failure to reach
/// the bus is logged and leaves the handle inert.
pub fn spawn_mpris(tx: Sender<AppMsg>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    let spawned = std::thread::Builder::new()
        .name("mpris".to_string())
        .spawn(move || {
            block_on(async move {
                let connection = match Connection::session().await {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(error = %e, "MPRIS: failed to connect to session bus");
                        return;
                    }
                };

                if let Err(e) = connection.request_name(BUS_NAME).await {
                    warn!(error = %e, "MPRIS: failed to acquire name");
                    return;
                }

                let object_server = connection.object_server();

                if let Err(e) = object_server
                    .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to register root iface");
                    return;
                }

                if let Err(e) = object_server
                    .at(
                        OBJECT_PATH,
                        PlayerIface {
                            tx,
                            state: state_for_thread,
                        },
                    )
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to register player iface");
                    return;
                }
                debug!("MPRIS service registered");

                // Keep the service alive.
                loop {
                    Timer::after(std::time::Duration::from_secs(3600)).await;
                }
            });
        });
    if let Err(e) = spawned {
        warn!(error = %e, "MPRIS: could not start service thread");
    }

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
