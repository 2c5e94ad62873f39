use super::*;
use crate::player::AudioDevice;
use crate::catalog::Track;
use crate::config::ThemeName;

fn t(id: &str) -> Track {
    Track {
        title: format!("Song {id}"),
        artist: "Band".into(),
        album: "Album".into(),
        duration: "3:00".into(),
        id: id.into(),
        thumbnail_url: String::new(),
    }
}

fn app_with(n: usize) -> App {
    let mut app = App::new(ThemeName::Dark);
    app.set_results((0..n).map(|i| t(&i.to_string())).collect());
    app
}

#[test]
fn cursor_is_clamped_not_wrapped() {
    let mut app = app_with(3);
    app.prev();
    assert_eq!(app.selected, 0);
    app.next();
    app.next();
    app.next();
    assert_eq!(app.selected, 2);
}

#[test]
fn empty_results_have_no_selection() {
    let mut app = app_with(0);
    app.next();
    assert_eq!(app.selected, 0);
    assert!(app.selection().is_none());
}

#[test]
fn new_results_reset_the_cursor() {
    let mut app = app_with(5);
    app.set_selected(4);
    app.set_results(vec![t("x"), t("y")]);
    assert_eq!(app.selected, 0);
    assert_eq!(app.selection().map(|(_, t)| t.id.as_str()), Some("x"));
}

#[test]
fn set_selected_clamps() {
    let mut app = app_with(2);
    app.set_selected(9);
    assert_eq!(app.selected, 1);
}

#[test]
fn blank_query_is_refused() {
    let mut app = app_with(0);
    app.enter_search();
    app.push_query_char(' ');
    assert_eq!(app.submit_query(), None);
    assert_eq!(app.focus, Focus::Search);

    for c in "daft punk ".chars() {
        app.push_query_char(c);
    }
    assert_eq!(app.submit_query().as_deref(), Some("daft punk"));
    assert_eq!(app.focus, Focus::Results);
    assert_eq!(app.last_query.as_deref(), Some("daft punk"));
}

#[test]
fn backspace_edits_the_query() {
    let mut app = app_with(0);
    app.push_query_char('a');
    app.push_query_char('b');
    app.pop_query_char();
    assert_eq!(app.query, "a");
}

#[test]
fn device_picker_opens_on_current_device() {
    let mut app = app_with(0);
    let devices = vec![
        AudioDevice::auto(),
        AudioDevice {
            name: "pulse/hdmi".into(),
            description: "HDMI".into(),
        },
    ];
    app.open_devices(devices, "pulse/hdmi");
    assert_eq!(app.focus, Focus::Devices);
    let picker = app.picker.as_mut().unwrap();
    assert_eq!(picker.selected, 1);
    picker.next();
    assert_eq!(picker.selected, 1);
    picker.prev();
    assert_eq!(picker.picked().map(|d| d.name.as_str()), Some("auto"));

    app.close_devices();
    assert!(app.picker.is_none());
    assert_eq!(app.focus, Focus::Results);
}

#[test]
fn empty_device_list_offers_auto() {
    let picker = DevicePicker::new(Vec::new(), "whatever");
    assert_eq!(picker.devices, vec![AudioDevice::auto()]);
}

#[test]
fn theme_cycles() {
    let mut app = App::new(ThemeName::Light);
    assert_eq!(app.cycle_theme(), ThemeName::Mini);
    assert_eq!(app.cycle_theme(), ThemeName::Dark);
}
