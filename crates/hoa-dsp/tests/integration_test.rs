//! Ramp Integration Tests
//!
//! Drives the ramp engine the way a host binding does:
//! - ramp times given in ms and re-derived on sample-rate changes
//! - targets redirected while a ramp is in flight
//! - angular ramps crossing the 0 / 2π seam
//! - several sources moving in lock step

use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;
use hoa_core::GainInputMode;
use hoa_dsp::{
    AngularRampLine, MultiSourceRampSet, MultichannelGain, ProcessorConfig, RampLine,
    ms_to_samples, samples_to_ms, wrap_two_pi,
};

const SAMPLE_RATE: f64 = 44100.0;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Advance `line` `n` times and collect the values
fn collect(line: &mut RampLine, n: usize) -> Vec<f64> {
    (0..n).map(|_| line.advance()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// LINEAR RAMPS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_ramp_time_from_ms() {
    assert_eq!(ms_to_samples(100.0, SAMPLE_RATE), 4410);
    assert_eq!(ms_to_samples(0.0, SAMPLE_RATE), 1);
    assert_eq!(ms_to_samples(-5.0, SAMPLE_RATE), 1);
    assert_relative_eq!(samples_to_ms(4410, SAMPLE_RATE), 100.0, epsilon = 1e-9);

    let mut line = RampLine::new(ms_to_samples(100.0, SAMPLE_RATE));
    line.set_target(1.0);
    let values = collect(&mut line, 4410);

    assert_relative_eq!(values[2204], 0.5, epsilon = 1e-9);
    assert_eq!(values[4409], 1.0);
    assert!(!line.is_ramping());
}

#[test]
fn test_monotonic_ramp() {
    let mut line = RampLine::with_value(-1.0, 64);
    line.set_target(1.0);
    let values = collect(&mut line, 64);

    for pair in values.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert_eq!(values[63], 1.0);
}

#[test]
fn test_retarget_mid_ramp() {
    let mut line = RampLine::new(10);
    line.set_target(10.0);
    collect(&mut line, 5);
    assert_relative_eq!(line.current(), 5.0, epsilon = 1e-12);

    // New ramp starts from where the old one was, with a fresh count
    line.set_target(0.0);
    assert_relative_eq!(line.step(), -0.5, epsilon = 1e-12);
    let values = collect(&mut line, 10);
    assert_eq!(values[9], 0.0);
}

#[test]
fn test_holds_after_completion() {
    let mut line = RampLine::new(3);
    line.set_target(2.0);
    let values = collect(&mut line, 8);
    assert!(values[2..].iter().all(|&v| v == 2.0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANGULAR RAMPS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_angular_ramp_crosses_seam() {
    let mut line = AngularRampLine::with_angle(TAU - 0.2, 4);
    line.set_target(0.2);

    let mut values = [0.0; 4];
    line.fill(&mut values);

    assert_relative_eq!(values[0], TAU - 0.1, epsilon = 1e-12);
    assert!(values[1] < 1e-12 || values[1] > TAU - 1e-12);
    assert_relative_eq!(values[2], 0.1, epsilon = 1e-12);
    assert_relative_eq!(values[3], 0.2, epsilon = 1e-12);
    assert!(values.iter().all(|&v| (0.0..TAU).contains(&v)));
}

#[test]
fn test_angular_targets_wrapped() {
    let mut line = AngularRampLine::new(1);
    line.set_target(-PI / 2.0);
    assert_relative_eq!(line.target(), 1.5 * PI, epsilon = 1e-12);
    assert_relative_eq!(line.advance(), 1.5 * PI, epsilon = 1e-12);

    line.set_target_direct(5.0 * PI);
    assert_relative_eq!(line.current(), PI, epsilon = 1e-12);
    assert_relative_eq!(wrap_two_pi(5.0 * PI), PI, epsilon = 1e-12);
}

#[test]
fn test_angular_never_travels_more_than_half_turn() {
    for (from, to) in [(0.1, 6.2), (6.2, 0.1), (1.0, 4.0), (4.0, 1.0), (0.0, 3.0)] {
        let mut line = AngularRampLine::with_angle(from, 100);
        line.set_target(to);
        assert!(line.step().abs() * 100.0 <= PI + 1e-12, "{from} -> {to}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MULTI-SOURCE AND GAIN
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_sources_reach_targets_together() {
    init_logging();

    let length = ms_to_samples(10.0, SAMPLE_RATE);
    let mut set = MultiSourceRampSet::new(4, length).unwrap();
    for i in 0..4 {
        set.set_radius(i, 1.0 + i as f64).unwrap();
        set.set_azimuth(i, i as f64 * PI / 2.0).unwrap();
    }

    let mut frame = vec![0.0; set.frame_len()];
    for _ in 0..length - 1 {
        set.process(&mut frame);
    }
    assert!(set.is_ramping());

    set.process(&mut frame);
    assert!(!set.is_ramping());
    for i in 0..4 {
        assert_eq!(frame[i], 1.0 + i as f64);
        assert_relative_eq!(frame[4 + i], i as f64 * PI / 2.0, epsilon = 1e-12);
    }
}

#[test]
fn test_gain_follows_sample_rate() {
    init_logging();

    let mut gain = MultichannelGain::new(4, 1.0, 1000.0);
    gain.set_sample_rate(4000.0);
    gain.set_input_mode(GainInputMode::Amplitude);
    gain.set_value(0.5);

    let mut channels = vec![vec![1.0; 4]; 4];
    let mut refs: Vec<&mut [f64]> = channels.iter_mut().map(|c| c.as_mut_slice()).collect();
    gain.process_in_place(&mut refs);

    for channel in &channels {
        assert_relative_eq!(channel[0], 0.875, epsilon = 1e-9);
        assert_relative_eq!(channel[3], 0.5, epsilon = 1e-9);
    }
    assert_relative_eq!(gain.value(), 0.5, epsilon = 1e-9);
}
