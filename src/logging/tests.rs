use super::*;

#[test]
fn level_names_parse_case_insensitively() {
    assert_eq!(parse_level("debug"), Level::DEBUG);
    assert_eq!(parse_level(" WARN "), Level::WARN);
    assert_eq!(parse_level("trace"), Level::TRACE);
}

#[test]
fn unknown_level_falls_back_to_info() {
    assert_eq!(parse_level("chatty"), Level::INFO);
    assert_eq!(parse_level(""), Level::INFO);
}

#[test]
fn configured_file_wins_over_default() {
    let settings = LogSettings {
        level: "info".into(),
        file: Some("/tmp/sintonia-test.log".into()),
    };
    assert_eq!(
        log_path(&settings),
        Some(PathBuf::from("/tmp/sintonia-test.log"))
    );
}

#[test]
fn blank_file_uses_default_location() {
    let settings = LogSettings {
        level: "info".into(),
        file: Some("  ".into()),
    };
    assert_eq!(log_path(&settings), default_log_path());
}
