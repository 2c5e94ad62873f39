use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::energy::EnergySource;
use crate::player::PlayerBackend;

/// Used when neither the energy source nor the player can say anything.
pub const FALLBACK_ENERGY: f64 = 0.3;

pub const BAR_COLUMNS: usize = 28;
pub const BAR_ROWS: usize = 8;
const PHASE_STEP: f64 = 0.2;

/// Bounded rolling buffer of energy samples, oldest first.
#[derive(Debug, Clone)]
pub struct EnergyTrace {
    samples: VecDeque<f64>,
    cap: usize,
}

impl EnergyTrace {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.cap {
            self.samples.pop_front();
        }
        self.samples.push_back(clamp_unit(sample));
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples scaled to `0..=100` for a sparkline.
    pub fn as_percent(&self) -> Vec<u64> {
        self.samples.iter().map(|s| (s * 100.0).round() as u64).collect()
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

fn usable(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// Primary sample, else the player heuristic, else the constant fallback.
pub fn resolve_energy(primary: Option<f64>, heuristic: impl FnOnce() -> Option<f64>) -> f64 {
    usable(primary)
        .or_else(|| usable(heuristic()))
        .map(clamp_unit)
        .unwrap_or(FALLBACK_ENERGY)
}

/// Column heights in `0..BAR_ROWS` from energy, a travelling sine wave and
/// jitter.
pub fn bar_heights<R: Rng>(energy: f64, phase: f64, columns: usize, rng: &mut R) -> Vec<u8> {
    let max = (BAR_ROWS - 1) as f64;
    (0..columns)
        .map(|i| {
            let wave = 0.5 + 0.5 * (phase + i as f64 * 0.35).sin();
            let jitter = rng.random_range(-0.3..=0.3);
            let level = energy * 6.5 + wave * 2.0 + jitter;
            level.clamp(0.0, max) as u8
        })
        .collect()
}

/// Text rows, top first, with `#` where a column is taller than the row.
pub fn render_bars(heights: &[u8]) -> Vec<String> {
    (0..BAR_ROWS)
        .rev()
        .map(|row| {
            heights
                .iter()
                .map(|&h| if usize::from(h) > row { '#' } else { ' ' })
                .collect()
        })
        .collect()
}

/// Visualizer loop state.
pub struct VisualizerDriver {
    trace: EnergyTrace,
    heights: Vec<u8>,
    phase: f64,
    rng: StdRng,
}

impl VisualizerDriver {
    pub fn new(history: usize) -> Self {
        Self::with_rng(history, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_rng(history: usize, rng: StdRng) -> Self {
        Self {
            trace: EnergyTrace::new(history),
            heights: vec![0; BAR_COLUMNS],
            phase: 0.0,
            rng,
        }
    }

    pub fn trace(&self) -> &EnergyTrace {
        &self.trace
    }

    pub fn heights(&self) -> &[u8] {
        &self.heights
    }

    /// Flatten the bars and drop the history.
    pub fn reset(&mut self) {
        self.trace.clear();
        self.heights.iter_mut().for_each(|h| *h = 0);
        self.phase = 0.0;
    }

    /// Take one sample and update the trace and bars. Never fails.
    pub fn tick(&mut self, source: &EnergySource, player: &dyn PlayerBackend, volume: u8) -> f64 {
        let energy = resolve_energy(source.sample(volume), || {
            if player.is_available() {
                player.sample_energy().ok()
            } else {
                None
            }
        });
        self.push(energy);
        energy
    }

    pub fn push(&mut self, energy: f64) {
        self.trace.push(energy);
        self.phase = (self.phase + PHASE_STEP) % TAU;
        self.heights = bar_heights(energy, self.phase, BAR_COLUMNS, &mut self.rng);
    }
}
