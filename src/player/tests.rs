use serde_json::json;

use super::ipc::{Incoming, encode_command, parse_line};
use super::mpv::{end_reason, log_line, parse_devices};
use super::*;

#[test]
fn encode_command_is_one_json_line_with_request_id() {
    let line = encode_command(7, &[json!("seek"), json!(-5.0), json!("relative")]);
    assert!(line.ends_with('\n'));
    let v: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
    assert_eq!(v["request_id"], 7);
    assert_eq!(v["command"], json!(["seek", -5.0, "relative"]));
}

#[test]
fn parse_line_splits_replies_and_events() {
    match parse_line(r#"{"data":42.5,"request_id":3,"error":"success"}"#) {
        Some(Incoming::Reply { id, reply }) => {
            assert_eq!(id, 3);
            assert_eq!(reply.error, "success");
            assert_eq!(reply.data, json!(42.5));
        }
        other => panic!("unexpected {other:?}"),
    }

    match parse_line(r#"{"request_id":4,"error":"property unavailable"}"#) {
        Some(Incoming::Reply { reply, .. }) => {
            assert_eq!(reply.error, "property unavailable");
            assert!(reply.data.is_null());
        }
        other => panic!("unexpected {other:?}"),
    }

    assert!(matches!(
        parse_line(r#"{"event":"end-file","reason":"eof"}"#),
        Some(Incoming::Event(_))
    ));
    assert!(parse_line("garbage").is_none());
    assert!(parse_line(r#"{"data":1}"#).is_none());
}

#[test]
fn only_clean_eof_is_a_natural_end() {
    assert_eq!(end_reason(&json!({"reason": "eof"})), EndReason::Eof);
    assert!(matches!(
        end_reason(&json!({"reason": "error", "file_error": "loading failed"})),
        EndReason::Error(msg) if msg.contains("loading failed")
    ));
    assert!(matches!(
        end_reason(&json!({"reason": "eof", "error": -13})),
        EndReason::Error(_)
    ));
    assert_eq!(
        end_reason(&json!({"reason": "stop"})),
        EndReason::Other("stop".into())
    );
    assert_eq!(
        end_reason(&json!({"reason": "quit"})),
        EndReason::Other("quit".into())
    );
}

#[test]
fn log_line_keeps_warnings_and_errors() {
    assert_eq!(
        log_line(&json!({"event":"log-message","level":"error","prefix":"ytdl_hook","text":"boom\n"}))
            .as_deref(),
        Some("ytdl_hook: boom")
    );
    assert!(log_line(&json!({"level":"info","prefix":"cplayer","text":"x"})).is_none());
}

#[test]
fn parse_devices_skips_nameless_and_defaults_description() {
    let data = json!([
        {"name": "auto", "description": "Autoselect device"},
        {"name": "pulse/sink", "description": ""},
        {"name": "", "description": "ghost"},
        {"description": "no name"}
    ]);
    let devices = parse_devices(&data);
    assert_eq!(
        devices,
        vec![
            AudioDevice {
                name: "auto".into(),
                description: "Autoselect device".into()
            },
            AudioDevice {
                name: "pulse/sink".into(),
                description: "pulse/sink".into()
            },
        ]
    );
    assert!(parse_devices(&json!(null)).is_empty());
}

#[test]
fn time_info_derives_missing_position() {
    let t = TimeInfo {
        position: None,
        duration: Some(200.0),
        percent: Some(25.0),
    }
    .normalized();
    assert_eq!(t.position, Some(50.0));

    let untouched = TimeInfo {
        position: None,
        duration: Some(200.0),
        percent: None,
    }
    .normalized();
    assert_eq!(untouched.position, None);
}

#[test]
fn bitrate_energy_is_bounded_and_monotonic_in_volume() {
    let mut prev = -1.0;
    for vol in [0.0, 25.0, 50.0, 75.0, 100.0] {
        let e = bitrate_energy(192_000.0, vol);
        assert!((0.0..=1.0).contains(&e));
        assert!(e >= prev);
        prev = e;
    }
    assert_eq!(bitrate_energy(0.0, 100.0), 0.2);
    assert_eq!(bitrate_energy(10_000_000.0, 100.0), 1.0);
}

#[test]
fn unavailable_player_reports_reason_everywhere() {
    let mut p = UnavailablePlayer::new("mpv missing");
    assert!(!p.is_available());
    assert_eq!(p.last_error().as_deref(), Some("mpv missing"));
    assert!(matches!(p.play("x"), Err(PlayerError::Unavailable(r)) if r == "mpv missing"));
    assert!(p.stop().is_err());
    assert_eq!(p.time_info(), TimeInfo::default());
}
