use super::*;
use std::sync::mpsc;

fn make_track() -> Track {
    Track {
        title: "Test Title".to_string(),
        artist: "Test Artist".to_string(),
        album: "Test Album".to_string(),
        duration: "3:25".to_string(),
        id: "abc-123".to_string(),
        thumbnail_url: String::new(),
    }
}

fn player_iface() -> (PlayerIface, Arc<Mutex<SharedState>>, mpsc::Receiver<AppMsg>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel();
    (
        PlayerIface {
            tx,
            state: state.clone(),
        },
        state,
        rx,
    )
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let meta = TrackMeta::new(&make_track(), Some("https://x.test/abc-123".into()));
    handle.set_track(Some(meta.clone()));
    assert_eq!(state.lock().unwrap().track, Some(meta));

    handle.set_track(None);
    assert!(state.lock().unwrap().track.is_none());
}

#[test]
fn track_meta_parses_length() {
    let meta = TrackMeta::new(&make_track(), None);
    assert_eq!(meta.length_secs, Some(205));
    assert_eq!(meta.title, "Test Title");
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let (iface, state, _rx) = player_iface();

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = PlaybackState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = PlaybackState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn methods_forward_control_messages() {
    let (iface, _state, rx) = player_iface();
    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx
        .try_iter()
        .filter_map(|m| match m {
            AppMsg::Control(c) => Some(c),
            _ => None,
        })
        .collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}

#[test]
fn quit_goes_through_the_root_interface() {
    let (tx, rx) = mpsc::channel();
    RootIface { tx }.quit();
    assert!(matches!(rx.try_recv(), Ok(AppMsg::Control(ControlCmd::Quit))));
}

#[test]
fn metadata_exposes_title_artist_album_url() {
    let meta = TrackMeta::new(&make_track(), Some("https://x.test/abc-123".into()));
    let map = metadata_map(Some(&meta));
    for key in [
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
        "mpris:trackid",
    ] {
        assert!(map.contains_key(key), "missing {key}");
    }
    assert_eq!(&*map["xesam:title"], &Value::from("Test Title"));
}

#[test]
fn metadata_is_empty_without_a_track() {
    assert!(metadata_map(None).is_empty());
}
