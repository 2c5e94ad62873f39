use super::*;

#[test]
fn rms_of_silence_is_zero() {
    assert_eq!(rms_level(&[]), 0.0);
    assert_eq!(rms_level(&[0.0; 64]), 0.0);
}

#[test]
fn rms_is_clamped_to_one() {
    assert_eq!(rms_level(&[1.0, -1.0, 1.0, -1.0]), 1.0);
    let quiet = rms_level(&[0.1, -0.1, 0.1, -0.1]);
    assert!((quiet - 0.2).abs() < 1e-6);
}

#[test]
fn synthetic_source_tracks_volume() {
    let source = EnergySource::Synthetic;
    assert!(!source.is_capture());
    assert_eq!(source.sample(0), Some(0.0));
    assert_eq!(source.sample(50), Some(0.5));
    assert_eq!(source.sample(100), Some(1.0));
    assert_eq!(synthetic_level(250), 1.0);
}

#[test]
fn disabled_capture_opens_synthetic() {
    let settings = VisualizerSettings {
        capture: false,
        device: None,
    };
    assert!(!EnergySource::open(&settings).is_capture());
}
