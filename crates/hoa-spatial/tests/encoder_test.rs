//! Encoder Integration Tests
//!
//! Runs the encoder the way a host does:
//! - ramped azimuth sweeps observed sample by sample
//! - frame and block paths producing identical output
//! - control commands sent from another thread
//! - signal-rate position control

use std::f64::consts::PI;
use std::thread;

use approx::assert_relative_eq;
use hoa_spatial::{Dimension, DistanceGainEncoder, EncoderConfig, SpatialError};

const SAMPLE_RATE: f64 = 44100.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Generate test sine wave
fn generate_sine(samples: usize, freq: f64) -> Vec<f64> {
    (0..samples)
        .map(|i| (2.0 * PI * freq * i as f64 / SAMPLE_RATE).sin())
        .collect()
}

/// Check signal has no NaN or Infinity
fn is_valid_signal(signal: &[f64]) -> bool {
    signal.iter().all(|x| x.is_finite())
}

/// Encoder with three moving sources
fn moving_sources(max_block_size: usize) -> DistanceGainEncoder {
    let config = EncoderConfig {
        max_block_size,
        air_absorption: true,
        ..EncoderConfig::new(3, 3, SAMPLE_RATE, 1.0)
    };
    let mut encoder = DistanceGainEncoder::new(config).unwrap();
    encoder.set_polar(0, 3.0, PI / 3.0).unwrap();
    encoder.set_polar(1, 0.2, 5.5).unwrap();
    encoder.set_polar_direct(2, 0.7, 4.0).unwrap();
    encoder.set_azimuth(2, 0.5).unwrap();
    encoder
}

// ═══════════════════════════════════════════════════════════════════════════════
// RAMPED POSITION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_half_turn_sweep() {
    init_logging();

    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, SAMPLE_RATE, 0.0)).unwrap();
    assert_eq!(encoder.ramp_samples(), 1);
    assert_eq!(encoder.radius(0), Some(1.0));
    assert_eq!(encoder.azimuth(0), Some(0.0));

    encoder.set_ramp_samples(4);
    encoder.set_azimuth(0, PI).unwrap();

    let mut out = [0.0; 3];
    for k in 1..=4 {
        encoder.process_sample(1.0, &mut out).unwrap();
        assert_relative_eq!(encoder.azimuth(0).unwrap(), k as f64 * PI / 4.0, epsilon = 1e-12);
        assert_eq!(out[0], 1.0);
    }

    // Holds at the target
    encoder.process_sample(1.0, &mut out).unwrap();
    assert_eq!(encoder.azimuth(0), Some(PI));
    assert_relative_eq!(out[2], -1.0);
}

#[test]
fn test_distance_ramp_attenuates_gradually() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, 1000.0, 10.0)).unwrap();
    encoder.set_radius(0, 4.0).unwrap();

    let mut omni = Vec::new();
    let mut out = [0.0; 3];
    for _ in 0..12 {
        encoder.process_sample(1.0, &mut out).unwrap();
        omni.push(out[0]);
    }

    for pair in omni.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert_eq!(omni[9], 1.0 / 16.0);
    assert_eq!(omni[11], 1.0 / 16.0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// FRAME / BLOCK EQUIVALENCE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_block_matches_frames() {
    init_logging();

    const FRAMES: usize = 100;
    let inputs: Vec<Vec<f64>> = (0..3).map(|s| generate_sine(FRAMES, 220.0 * (s + 1) as f64)).collect();

    let mut scalar = moving_sources(16);
    let harmonics = scalar.number_of_harmonics();
    let mut expected = vec![vec![0.0; FRAMES]; harmonics];
    let mut frame_out = vec![0.0; harmonics];
    for t in 0..FRAMES {
        let frame_in = [inputs[0][t], inputs[1][t], inputs[2][t]];
        scalar.process_frame(&frame_in, &mut frame_out).unwrap();
        for h in 0..harmonics {
            expected[h][t] = frame_out[h];
        }
    }

    // 100 frames through 16-sample chunks
    let mut block = moving_sources(16);
    let mut actual = vec![vec![0.0; FRAMES]; harmonics];
    {
        let input_refs: Vec<&[f64]> = inputs.iter().map(|c| c.as_slice()).collect();
        let mut output_refs: Vec<&mut [f64]> = actual.iter_mut().map(|c| c.as_mut_slice()).collect();
        block.process_block(&input_refs, &mut output_refs).unwrap();
    }

    assert_eq!(actual, expected);
    assert!(actual.iter().all(|c| is_valid_signal(c)));
    assert_eq!(block.azimuth(2), scalar.azimuth(2));
}

#[test]
fn test_block_add_accumulates() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, SAMPLE_RATE, 0.0)).unwrap();
    let input = [1.0; 8];
    let mut w = [0.5; 8];
    let mut y = [0.0; 8];
    let mut x = [0.0; 8];

    encoder
        .process_block_add(&[&input], &mut [&mut w, &mut y, &mut x])
        .unwrap();

    assert_eq!(w, [1.5; 8]);
    assert_eq!(x, [1.0; 8]);
}

#[test]
fn test_block_length_mismatch() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 2, SAMPLE_RATE, 0.0)).unwrap();
    let a = [0.0; 8];
    let b = [0.0; 4];
    let mut w = [0.0; 8];
    let mut y = [0.0; 8];
    let mut x = [0.0; 8];

    assert!(matches!(
        encoder.process_block(&[&a, &b], &mut [&mut w, &mut y, &mut x]),
        Err(SpatialError::BufferSizeMismatch { expected: 8, got: 4 })
    ));
}

#[test]
fn test_muted_source_in_block() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(2, 2, SAMPLE_RATE, 0.0)).unwrap();
    encoder.set_mute(0, true).unwrap();

    let loud = [1.0; 16];
    let silent = [0.0; 16];
    let mut outputs = vec![vec![0.0; 16]; 5];
    let mut refs: Vec<&mut [f64]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();
    encoder.process_block(&[&loud, &silent], &mut refs).unwrap();

    assert!(outputs.iter().flatten().all(|&s| s == 0.0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTROL QUEUE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_control_from_other_thread() {
    init_logging();

    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 2, 1000.0, 4.0)).unwrap();
    let mut control = encoder.take_control().unwrap();

    let control = thread::spawn(move || {
        control.set_polar(1, 2.0, PI / 2.0).unwrap();
        control.set_mute(0, true).unwrap();
        control
    })
    .join()
    .unwrap();

    // Nothing applied until the audio thread processes
    assert_eq!(encoder.target_radius(1), Some(1.0));
    assert_eq!(encoder.is_muted(0), Some(false));

    let mut outputs = vec![vec![0.0; 4]; 3];
    let inputs = [[1.0; 4], [1.0; 4]];
    {
        let mut refs: Vec<&mut [f64]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();
        encoder.process_block(&[&inputs[0], &inputs[1]], &mut refs).unwrap();
    }

    assert_eq!(encoder.is_muted(0), Some(true));
    assert_eq!(encoder.radius(1), Some(2.0));
    assert_relative_eq!(encoder.azimuth(1).unwrap(), PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(outputs[0][3], 0.25);
    assert_relative_eq!(outputs[1][3], 0.25, epsilon = 1e-12);
    assert!(control.available() > 0);
}

#[test]
fn test_control_ramp_time() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, 1000.0, 100.0)).unwrap();
    let mut control = encoder.take_control().unwrap();
    control.set_ramp_ms(2.0).unwrap();
    control.set_radius(0, 3.0).unwrap();

    let mut out = [0.0; 3];
    encoder.process_sample(1.0, &mut out).unwrap();
    assert_relative_eq!(encoder.radius(0).unwrap(), 2.0);
    encoder.process_sample(1.0, &mut out).unwrap();
    assert_eq!(encoder.radius(0), Some(3.0));
    assert_eq!(encoder.ramp_ms(), 2.0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIGNAL-RATE CONTROL
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_signal_rate_azimuth_keeps_ramped_radius() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, 1000.0, 0.0)).unwrap();
    encoder.set_radius_direct(0, 2.0).unwrap();

    let input = [1.0; 4];
    let azimuth = [0.0, PI / 2.0, PI, 1.5 * PI];
    let mut outputs = vec![vec![0.0; 4]; 3];
    {
        let mut refs: Vec<&mut [f64]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();
        encoder
            .process_block_azimuth(0, &input, &azimuth, &mut refs)
            .unwrap();
    }

    assert_eq!(outputs[0], vec![0.25; 4]);
    assert_relative_eq!(outputs[1][1], 0.25, epsilon = 1e-12);
    assert_relative_eq!(outputs[1][3], -0.25, epsilon = 1e-12);
    assert_relative_eq!(encoder.azimuth(0).unwrap(), 1.5 * PI);
    assert_eq!(encoder.radius(0), Some(2.0));
}

#[test]
fn test_signal_rate_radius_widens() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, 1000.0, 0.0)).unwrap();
    let input = [1.0; 2];
    let radius = [1.0, 0.0];
    let mut outputs = vec![vec![0.0; 2]; 3];
    {
        let mut refs: Vec<&mut [f64]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();
        encoder.process_block_radius(0, &input, &radius, &mut refs).unwrap();
    }

    assert_eq!(outputs[2], vec![1.0, 0.0]);
    assert_eq!(outputs[0], vec![1.0, 1.0]);
    assert_eq!(encoder.radius(0), Some(0.0));
}

#[test]
fn test_signal_rate_cartesian_matches_polar() {
    init_logging();

    let frames = 256;
    let input = generate_sine(frames, 440.0);
    let radius: Vec<f64> = (0..frames).map(|i| 0.25 + i as f64 / 64.0).collect();
    let azimuth: Vec<f64> = (0..frames).map(|i| i as f64 * 0.05).collect();
    let x: Vec<f64> = radius
        .iter()
        .zip(&azimuth)
        .map(|(&r, &a)| hoa_spatial::position::abscissa(r, a))
        .collect();
    let y: Vec<f64> = radius
        .iter()
        .zip(&azimuth)
        .map(|(&r, &a)| hoa_spatial::position::ordinate(r, a))
        .collect();

    let config = EncoderConfig {
        max_block_size: 100,
        ..EncoderConfig::new(3, 2, SAMPLE_RATE, 10.0)
    };
    let mut polar = DistanceGainEncoder::new(config.clone()).unwrap();
    let mut cartesian = DistanceGainEncoder::new(config).unwrap();

    let mut expected = vec![vec![0.0; frames]; 7];
    let mut actual = vec![vec![0.0; frames]; 7];
    {
        let mut refs: Vec<&mut [f64]> = expected.iter_mut().map(|c| c.as_mut_slice()).collect();
        polar
            .process_block_polar(1, &input, &radius, &azimuth, &mut refs)
            .unwrap();
    }
    {
        let mut refs: Vec<&mut [f64]> = actual.iter_mut().map(|c| c.as_mut_slice()).collect();
        cartesian
            .process_block_cartesian(1, &input, &x, &y, &mut refs)
            .unwrap();
    }

    for (a, e) in actual.iter().zip(&expected) {
        assert!(is_valid_signal(a));
        for (&a, &e) in a.iter().zip(e) {
            assert_relative_eq!(a, e, epsilon = 1e-9);
        }
    }
    assert_relative_eq!(cartesian.radius(1).unwrap(), polar.radius(1).unwrap(), epsilon = 1e-12);
    assert_eq!(cartesian.radius(0), Some(1.0));
}

#[test]
fn test_signal_rate_length_mismatch() {
    let mut encoder = DistanceGainEncoder::new(EncoderConfig::new(1, 1, SAMPLE_RATE, 0.0)).unwrap();
    let mut outputs = vec![vec![0.0; 4]; 3];
    let mut refs: Vec<&mut [f64]> = outputs.iter_mut().map(|c| c.as_mut_slice()).collect();

    assert!(matches!(
        encoder.process_block_ordinate(0, &[1.0; 4], &[0.0; 3], &mut refs),
        Err(SpatialError::BufferSizeMismatch { expected: 4, got: 3 })
    ));
}

#[test]
fn test_spherical_from_json() {
    let config = EncoderConfig::from_json(
        r#"{ "order": 3, "number_of_sources": 2, "dimension": "Spherical", "ramp_ms": 5.0 }"#,
    )
    .unwrap();
    assert_eq!(config.dimension, Dimension::Spherical);

    let encoder = DistanceGainEncoder::new(config).unwrap();
    assert_eq!(encoder.number_of_harmonics(), 16);
    assert_eq!(encoder.harmonic_name(15).as_deref(), Some("Harmonic 3 3"));
    assert_eq!(encoder.ramp_samples(), 220);
}
