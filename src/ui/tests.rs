use std::sync::mpsc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use super::*;
use crate::config::Settings;
use crate::energy::EnergySource;
use crate::loader::fake::{sources, track};
use crate::message::AppMsg;
use crate::player::fake::FakePlayer;

fn coordinator() -> (Coordinator, mpsc::Receiver<AppMsg>) {
    let (tx, rx) = mpsc::channel();
    let (player, _state) = FakePlayer::new();
    let (sources, _covers) = sources(vec![track("a"), track("b")]);
    let c = Coordinator::new(
        &Settings::default(),
        Box::new(player),
        EnergySource::Synthetic,
        sources,
        tx,
    );
    (c, rx)
}

fn render(c: &Coordinator, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw(f, c)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn controls_text_lists_every_binding_and_quit() {
    let text = controls_text();
    for (key, action) in CONTROLS {
        assert!(text.contains(&format!("[{key}] {action}")));
    }
    assert!(text.ends_with("[q] quit"));
}

#[test]
fn lyric_scroll_keeps_highlight_mid_pane() {
    assert_eq!(lyric_scroll(None, 10), 0);
    assert_eq!(lyric_scroll(Some(3), 10), 0);
    assert_eq!(lyric_scroll(Some(12), 10), 7);
}

#[test]
fn gauge_ratio_is_bounded() {
    assert_eq!(gauge_ratio(25.0), 0.25);
    assert_eq!(gauge_ratio(140.0), 1.0);
    assert_eq!(gauge_ratio(-3.0), 0.0);
    assert_eq!(gauge_ratio(f64::NAN), 0.0);
}

#[test]
fn centered_rect_fits_inside() {
    let outer = Rect::new(0, 0, 100, 40);
    let r = centered_rect_sized(60, 10, outer);
    assert_eq!((r.width, r.height), (60, 10));
    assert_eq!((r.x, r.y), (20, 15));

    let small = Rect::new(0, 0, 30, 8);
    let r = centered_rect_sized(60, 20, small);
    assert!(r.width <= small.width && r.height <= small.height);
}

#[test]
fn idle_screen_shows_placeholders() {
    let (c, _rx) = coordinator();
    let text = render(&c, 140, 50);
    assert!(text.contains("Press / to search"));
    assert!(text.contains("No results"));
    assert!(text.contains("No lyrics"));
    assert!(text.contains("No cover"));
    assert!(text.contains("Stopped"));
}

#[test]
fn search_results_are_listed() {
    let (mut c, rx) = coordinator();
    c.search("song");
    let msg = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    c.handle_msg(msg);

    let text = render(&c, 140, 50);
    assert!(text.contains("Song a"));
    assert!(text.contains("Song b"));
    assert!(text.contains("2 results"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let (c, _rx) = coordinator();
    render(&c, 20, 6);
}

#[test]
fn half_blocks_pair_pixel_rows() {
    let red = (255, 0, 0);
    let blue = (0, 0, 255);
    let pixels = vec![vec![red, red], vec![blue, blue]];
    let area = Rect::new(0, 0, 2, 1);
    let mut buf = Buffer::empty(area);
    HalfBlocks::new(&pixels).render(area, &mut buf);

    let cell = &buf[(0, 0)];
    assert_eq!(cell.symbol(), "▀");
    assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
    assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
}
