use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::energy::EnergySource;
use crate::lyrics::LyricsDoc;
use crate::player::TimeInfo;
use crate::player::fake::FakePlayer;

fn info(position: Option<f64>, duration: Option<f64>, percent: Option<f64>) -> TimeInfo {
    TimeInfo {
        position,
        duration,
        percent,
    }
}

#[test]
fn percent_is_derived_from_position_and_duration() {
    let view = progress_view(&info(Some(30.0), Some(120.0), None));
    assert_eq!(view.percent, 25.0);
    assert_eq!(view.label, "00:30 / 02:00");
}

#[test]
fn backend_percent_wins_and_is_clamped() {
    assert_eq!(derive_percent(&info(Some(30.0), Some(120.0), Some(40.0))), Some(40.0));
    assert_eq!(derive_percent(&info(Some(500.0), Some(120.0), None)), Some(100.0));
    assert_eq!(derive_percent(&info(None, None, Some(-3.0))), Some(0.0));
    assert_eq!(derive_percent(&info(Some(5.0), Some(0.0), None)), None);
    assert_eq!(derive_percent(&info(Some(5.0), None, None)), None);
}

#[test]
fn position_is_recovered_from_percent() {
    let view = progress_view(&info(None, Some(200.0), Some(50.0)));
    assert_eq!(view.label, "01:40 / 03:20");
    assert_eq!(view.percent, 50.0);
}

#[test]
fn hour_long_tracks_use_hours_on_both_sides() {
    let view = progress_view(&info(Some(65.0), Some(3725.0), None));
    assert_eq!(view.label, "0:01:05 / 1:02:05");
}

#[test]
fn unknown_times_render_placeholders() {
    let view = progress_view(&TimeInfo::default());
    assert_eq!(view.percent, 0.0);
    assert_eq!(view.label, "00:00 / --:--");
    assert_eq!(ProgressView::idle().label, IDLE_LABEL);
}

#[test]
fn progress_tick_is_idle_without_active_track() {
    let (player, state) = FakePlayer::new();
    state.lock().unwrap().time = info(Some(10.0), Some(100.0), None);
    let mut driver = ProgressDriver::new();

    let tick = driver.tick(&player, false, None);
    assert_eq!(tick.view, ProgressView::idle());

    state.lock().unwrap().available = false;
    let tick = driver.tick(&player, true, None);
    assert_eq!(tick.view, ProgressView::idle());
}

#[test]
fn lyric_highlight_is_reported_only_on_change() {
    let (player, state) = FakePlayer::new();
    let doc = LyricsDoc::parse("[00:00.00]a\n[00:01.50]b\n[00:04.00]c");
    let mut driver = ProgressDriver::new();

    let at = |pos: f64, driver: &mut ProgressDriver| {
        state.lock().unwrap().time = info(Some(pos), Some(10.0), None);
        driver.tick(&player, true, Some(&doc)).lyric
    };

    assert_eq!(at(2.0, &mut driver), Some(Some(1)));
    assert_eq!(at(2.5, &mut driver), None);
    assert_eq!(at(3.9, &mut driver), None);
    assert_eq!(at(4.0, &mut driver), Some(Some(2)));
    // Seeking back before the first line clears the highlight once.
    assert_eq!(at(-1.0, &mut driver), Some(None));
    assert_eq!(at(-0.5, &mut driver), None);
    assert_eq!(driver.last_lyric(), None);
}

#[test]
fn unsynced_lyrics_never_highlight() {
    let (player, state) = FakePlayer::new();
    state.lock().unwrap().time = info(Some(3.0), Some(10.0), None);
    let doc = LyricsDoc::parse("just some words");
    let mut driver = ProgressDriver::new();
    assert_eq!(driver.tick(&player, true, Some(&doc)).lyric, None);
}

#[test]
fn trace_keeps_most_recent_samples() {
    let mut trace = EnergyTrace::new(3);
    for v in [0.1, 0.2, 0.3, 0.4, 7.0, f64::NAN] {
        trace.push(v);
    }
    assert_eq!(trace.as_percent(), vec![40, 100, 0]);
}

#[test]
fn energy_falls_back_in_order() {
    assert_eq!(resolve_energy(Some(0.6), || Some(0.9)), 0.6);
    assert_eq!(resolve_energy(Some(0.0), || Some(0.9)), 0.9);
    assert_eq!(resolve_energy(None, || Some(1.7)), 1.0);
    assert_eq!(resolve_energy(None, || None), FALLBACK_ENERGY);
    assert_eq!(resolve_energy(Some(f64::NAN), || Some(0.0)), FALLBACK_ENERGY);
}

#[test]
fn visualizer_tick_uses_player_heuristic_then_constant() {
    let (player, state) = FakePlayer::new();
    let mut viz = VisualizerDriver::with_rng(4, StdRng::seed_from_u64(7));
    let silent = EnergySource::Synthetic;

    // Synthetic source at volume 0 yields zero, so the player is asked.
    state.lock().unwrap().energy = Some(0.45);
    assert_eq!(viz.tick(&silent, &player, 0), 0.45);

    state.lock().unwrap().energy = None;
    assert_eq!(viz.tick(&silent, &player, 0), FALLBACK_ENERGY);

    assert_eq!(viz.tick(&silent, &player, 80), 0.8);
    assert_eq!(viz.trace().as_percent().len(), 3);

    viz.reset();
    assert!(viz.trace().as_percent().is_empty());
    assert!(viz.heights().iter().all(|h| *h == 0));
}

#[test]
fn bars_stay_within_rows() {
    let mut rng = StdRng::seed_from_u64(1);
    for energy in [0.0, 0.5, 1.0] {
        let heights = bar_heights(energy, 1.0, BAR_COLUMNS, &mut rng);
        assert_eq!(heights.len(), BAR_COLUMNS);
        assert!(heights.iter().all(|h| usize::from(*h) < BAR_ROWS));
    }
    // Full energy keeps every column near the top.
    let loud = bar_heights(1.0, 0.0, BAR_COLUMNS, &mut rng);
    assert!(loud.iter().all(|h| *h >= 6));
}

#[test]
fn render_bars_draws_columns_bottom_up() {
    let rows = render_bars(&[0, 1, 7]);
    assert_eq!(rows.len(), BAR_ROWS);
    assert_eq!(rows[BAR_ROWS - 1], " ##");
    // The top row stays empty: heights never exceed BAR_ROWS - 1.
    assert_eq!(rows[0], "   ");
    assert_eq!(rows[1], "  #");
}

#[test]
fn interval_ticks_once_per_period_and_pauses() {
    let start = Instant::now();
    let period = Duration::from_millis(500);
    let mut timer = Interval::new(period, start);

    assert!(!timer.poll(start));
    assert!(timer.poll(start + period));
    assert!(!timer.poll(start + period));
    // A long stall yields one tick, not a burst.
    assert!(timer.poll(start + period * 5));
    assert!(!timer.poll(start + period * 5 + Duration::from_millis(10)));

    timer.pause();
    assert!(timer.is_paused());
    assert!(!timer.poll(start + period * 20));
    assert_eq!(timer.remaining(start), None);

    let later = start + period * 21;
    timer.resume(later);
    assert!(timer.poll(later));
    assert_eq!(timer.remaining(later), Some(period));
}

#[test]
fn paused_interval_starts_silent() {
    let now = Instant::now();
    let mut timer = Interval::new_paused(Duration::from_millis(200), now);
    assert!(!timer.poll(now + Duration::from_secs(1)));
    assert_eq!(timer.period(), Duration::from_millis(200));
}
