//! Coarse `0..=1` activity estimate for the visualizer.
//!
//! `Capture` reads an input device through `rodio::cpal` (a PulseAudio/PipeWire
//! monitor works best) and keeps the latest RMS level. `Synthetic` follows the
//! volume. Opening the capture stream never fails hard: any error falls back
//! to `Synthetic`.

use std::sync::{Arc, Mutex};

use rodio::cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rodio::cpal::{self, SampleFormat, Stream};
use tracing::{debug, info, warn};

use crate::config::VisualizerSettings;

/// Gain applied to the raw RMS so ordinary music fills the range.
const RMS_GAIN: f32 = 2.0;

pub enum EnergySource {
    Capture {
        stream: Stream,
        level: Arc<Mutex<Option<f32>>>,
    },
    Synthetic,
}

impl EnergySource {
    /// Open the configured capture device, or the synthetic source.
    pub fn open(settings: &VisualizerSettings) -> Self {
        if !settings.capture {
            info!("audio capture disabled; using synthetic energy");
            return Self::Synthetic;
        }
        match open_capture(settings.device.as_deref()) {
            Ok((stream, level)) => {
                // Starts paused; the visualizer loop resumes it on play.
                if let Err(e) = stream.pause() {
                    debug!(error = %e, "capture stream could not be paused");
                }
                Self::Capture { stream, level }
            }
            Err(e) => {
                warn!(error = %e, "audio capture unavailable; using synthetic energy");
                Self::Synthetic
            }
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Self::Capture { .. })
    }

    /// Take the latest sample. `None` or zero means "no signal", and the
    /// caller falls back to the player heuristic.
    pub fn sample(&self, volume: u8) -> Option<f64> {
        match self {
            Self::Capture { level, .. } => level
                .lock()
                .ok()
                .and_then(|mut l| l.take())
                .map(|v| f64::from(v).clamp(0.0, 1.0)),
            Self::Synthetic => Some(synthetic_level(volume)),
        }
    }

    pub fn pause(&self) {
        if let Self::Capture { stream, .. } = self {
            if let Err(e) = stream.pause() {
                debug!(error = %e, "pause capture failed");
            }
        }
    }

    pub fn resume(&self) {
        if let Self::Capture { stream, .. } = self {
            if let Err(e) = stream.play() {
                debug!(error = %e, "resume capture failed");
            }
        }
    }
}

pub fn synthetic_level(volume: u8) -> f64 {
    (f64::from(volume) / 100.0).clamp(0.0, 1.0)
}

/// RMS of a buffer, scaled and clamped to `0..=1`.
pub fn rms_level(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    ((sum / samples.len() as f32).sqrt() * RMS_GAIN).clamp(0.0, 1.0)
}

type Level = Arc<Mutex<Option<f32>>>;

fn open_capture(device_name: Option<&str>) -> Result<(Stream, Level), Box<dyn std::error::Error>> {
    let host = cpal::default_host();
    let device = match device_name {
        Some(wanted) => host
            .input_devices()?
            .find(|d| d.name().map(|n| n == wanted).unwrap_or(false))
            .ok_or_else(|| format!("input device {wanted:?} not found"))?,
        None => host
            .default_input_device()
            .ok_or("no default input device")?,
    };

    let supported = device.default_input_config()?;
    let format = supported.sample_format();
    let config = supported.config();
    let level: Level = Arc::new(Mutex::new(None));
    let on_error = |err| warn!(error = %err, "capture stream error");

    let stream = match format {
        SampleFormat::F32 => {
            let level = level.clone();
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &_| store(&level, rms_level(data)),
                on_error,
                None,
            )?
        }
        SampleFormat::I16 => {
            let level = level.clone();
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &_| {
                    let samples: Vec<f32> =
                        data.iter().map(|s| *s as f32 / i16::MAX as f32).collect();
                    store(&level, rms_level(&samples));
                },
                on_error,
                None,
            )?
        }
        other => return Err(format!("unsupported sample format {other:?}").into()),
    };

    info!(device = %device.name().unwrap_or_default(), "audio capture ready");
    Ok((stream, level))
}

fn store(level: &Level, value: f32) {
    if let Ok(mut l) = level.lock() {
        *l = Some(value);
    }
}

#[cfg(test)]
mod tests;
