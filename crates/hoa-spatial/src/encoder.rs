//! Multi-source encoder with ramped polar control
//!
//! Per source and per sample:
//! dry × distance gain → air absorption (optional) → harmonic encode →
//! widening (optional) → written or summed into the harmonic bus.
//!
//! Radius and azimuth of every source are driven by a `MultiSourceRampSet`,
//! advanced exactly once per output sample on both the frame and the block
//! paths. The two paths share the per-sample arithmetic and the source
//! summation order, so they produce identical output.

use hoa_core::{Sample, add_into};
use hoa_dsp::{MultiSourceRampSet, ms_to_samples, samples_to_ms};
use rtrb::Consumer;

use crate::air::AirAbsorption;
use crate::config::EncoderConfig;
use crate::control::{ControlCommand, EncoderControl, Transition, control_queue};
use crate::error::{SpatialError, SpatialResult};
use crate::hoa::{HarmonicBasis, Wider, basis_for};
use crate::position::{self, PolarCoord, abscissa, ordinate};

/// Inverse-square distance gain.
///
/// Sources on or inside the loudspeaker circle are not attenuated.
#[inline]
pub fn distance_gain(radius: f64) -> f64 {
    if radius > 1.0 {
        1.0 / (radius * radius)
    } else {
        1.0
    }
}

/// Ramped multi-source harmonic encoder
pub struct DistanceGainEncoder {
    config: EncoderConfig,
    basis: Box<dyn HarmonicBasis>,
    wider: Option<Wider>,
    ramps: MultiSourceRampSet,
    muted: Vec<bool>,
    /// One filter per source when air absorption is on, empty otherwise
    air: Vec<AirAbsorption>,
    /// Ramp time; the sample count is derived from it
    ramp_ms: f64,

    /// `[r0.., a0..]` written by the ramp set every sample
    frame: Vec<Sample>,
    /// Harmonics of one source for one sample
    harmonics_frame: Vec<Sample>,
    /// Per-source ramp values for one chunk
    radius_buffer: Vec<Vec<Sample>>,
    azimuth_buffer: Vec<Vec<Sample>>,
    /// Gain-compensated signal of one source for one chunk
    signal_buffer: Vec<Sample>,
    /// Harmonics of one source for one chunk
    harmonic_buffer: Vec<Vec<Sample>>,

    commands: Consumer<ControlCommand>,
    control: Option<EncoderControl>,
}

impl DistanceGainEncoder {
    /// Build an encoder. Every source starts at radius 1, azimuth 0.
    pub fn new(config: EncoderConfig) -> SpatialResult<Self> {
        config.validate()?;

        let basis = basis_for(config.dimension, config.order)?;
        let harmonics = basis.number_of_harmonics();
        let sources = config.number_of_sources;
        let block = config.max_block_size;

        let ramp_ms = if config.ramp_ms.is_nan() || config.ramp_ms < 0.0 {
            log::warn!("Ramp time {} ms clamped to 0", config.ramp_ms);
            0.0
        } else {
            config.ramp_ms
        };
        let ramp_samples = ms_to_samples(ramp_ms, config.sample_rate);

        let mut ramps = MultiSourceRampSet::new(sources, ramp_samples)?;
        ramps.reset_to(1.0, 0.0);

        let wider = config.widening.then(|| Wider::new(basis.as_ref()));
        let air = if config.air_absorption {
            vec![AirAbsorption::new(config.sample_rate); sources]
        } else {
            Vec::new()
        };

        let (control, commands) = control_queue(config.control_capacity, sources);

        log::debug!(
            "HOA encoder: {:?} order {}, {} sources, {} harmonics, ramp {} samples, block {}",
            config.dimension,
            config.order,
            sources,
            harmonics,
            ramp_samples,
            block
        );

        Ok(Self {
            basis,
            wider,
            ramps,
            muted: vec![false; sources],
            air,
            ramp_ms,
            frame: vec![0.0; sources * 2],
            harmonics_frame: vec![0.0; harmonics],
            radius_buffer: vec![vec![0.0; block]; sources],
            azimuth_buffer: vec![vec![0.0; block]; sources],
            signal_buffer: vec![0.0; block],
            harmonic_buffer: vec![vec![0.0; block]; harmonics],
            commands,
            control: Some(control),
            config,
        })
    }

    /// Hand out the control-thread handle. Only the first call returns it.
    pub fn take_control(&mut self) -> Option<EncoderControl> {
        self.control.take()
    }

    // ============ Info ============

    #[inline]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.basis.order()
    }

    #[inline]
    pub fn number_of_sources(&self) -> usize {
        self.muted.len()
    }

    #[inline]
    pub fn number_of_harmonics(&self) -> usize {
        self.basis.number_of_harmonics()
    }

    pub fn harmonic_name(&self, index: usize) -> Option<String> {
        self.basis.harmonic_name(index)
    }

    pub fn harmonic_degree(&self, index: usize) -> Option<usize> {
        (index < self.number_of_harmonics()).then(|| self.basis.harmonic_degree(index))
    }

    /// Current (mid-ramp) radius of a source
    pub fn radius(&self, source: usize) -> Option<f64> {
        self.ramps.radius(source)
    }

    /// Current (mid-ramp) azimuth of a source
    pub fn azimuth(&self, source: usize) -> Option<f64> {
        self.ramps.azimuth(source)
    }

    pub fn target_radius(&self, source: usize) -> Option<f64> {
        self.ramps.target_radius(source)
    }

    pub fn target_azimuth(&self, source: usize) -> Option<f64> {
        self.ramps.target_azimuth(source)
    }

    pub fn is_muted(&self, source: usize) -> Option<bool> {
        self.muted.get(source).copied()
    }

    // ============ Parameters ============

    fn check_source(&self, source: usize) -> SpatialResult<()> {
        if source < self.muted.len() {
            Ok(())
        } else {
            Err(SpatialError::SourceOutOfRange {
                index: source,
                count: self.muted.len(),
            })
        }
    }

    pub fn set_radius(&mut self, source: usize, radius: f64) -> SpatialResult<()> {
        self.check_source(source)?;
        self.ramps.set_radius(source, radius)?;
        Ok(())
    }

    pub fn set_radius_direct(&mut self, source: usize, radius: f64) -> SpatialResult<()> {
        self.check_source(source)?;
        self.ramps.set_radius_direct(source, radius)?;
        Ok(())
    }

    pub fn set_azimuth(&mut self, source: usize, azimuth: f64) -> SpatialResult<()> {
        self.check_source(source)?;
        self.ramps.set_azimuth(source, azimuth)?;
        Ok(())
    }

    pub fn set_azimuth_direct(&mut self, source: usize, azimuth: f64) -> SpatialResult<()> {
        self.check_source(source)?;
        self.ramps.set_azimuth_direct(source, azimuth)?;
        Ok(())
    }

    pub fn set_polar(&mut self, source: usize, radius: f64, azimuth: f64) -> SpatialResult<()> {
        self.set_radius(source, radius)?;
        self.set_azimuth(source, azimuth)
    }

    pub fn set_polar_direct(
        &mut self,
        source: usize,
        radius: f64,
        azimuth: f64,
    ) -> SpatialResult<()> {
        self.set_radius_direct(source, radius)?;
        self.set_azimuth_direct(source, azimuth)
    }

    /// Ramp a source towards a cartesian position
    pub fn set_cartesian(&mut self, source: usize, x: f64, y: f64) -> SpatialResult<()> {
        let polar = PolarCoord::from_cartesian(x, y);
        self.set_polar(source, polar.radius, polar.azimuth)
    }

    pub fn set_cartesian_direct(&mut self, source: usize, x: f64, y: f64) -> SpatialResult<()> {
        let polar = PolarCoord::from_cartesian(x, y);
        self.set_polar_direct(source, polar.radius, polar.azimuth)
    }

    /// Target position of a source as `(abscissa, ordinate)`
    fn target_cartesian(&self, source: usize) -> SpatialResult<(f64, f64)> {
        self.check_source(source)?;
        let radius = self.ramps.target_radius(source).unwrap_or(0.0);
        let azimuth = self.ramps.target_azimuth(source).unwrap_or(0.0);
        Ok((abscissa(radius, azimuth), ordinate(radius, azimuth)))
    }

    /// Move the target abscissa, keeping the target ordinate
    pub fn set_abscissa(&mut self, source: usize, x: f64) -> SpatialResult<()> {
        let (_, y) = self.target_cartesian(source)?;
        self.set_cartesian(source, x, y)
    }

    pub fn set_abscissa_direct(&mut self, source: usize, x: f64) -> SpatialResult<()> {
        let (_, y) = self.target_cartesian(source)?;
        self.set_cartesian_direct(source, x, y)
    }

    /// Move the target ordinate, keeping the target abscissa
    pub fn set_ordinate(&mut self, source: usize, y: f64) -> SpatialResult<()> {
        let (x, _) = self.target_cartesian(source)?;
        self.set_cartesian(source, x, y)
    }

    pub fn set_ordinate_direct(&mut self, source: usize, y: f64) -> SpatialResult<()> {
        let (x, _) = self.target_cartesian(source)?;
        self.set_cartesian_direct(source, x, y)
    }

    /// Mute or unmute a source. Muted sources keep ramping but are not
    /// rendered.
    pub fn set_mute(&mut self, source: usize, muted: bool) -> SpatialResult<()> {
        self.check_source(source)?;
        self.apply_mute(source, muted);
        Ok(())
    }

    fn apply_mute(&mut self, source: usize, muted: bool) {
        if muted && !self.muted[source] {
            if let Some(air) = self.air.get_mut(source) {
                air.reset();
            }
        }
        self.muted[source] = muted;
    }

    /// Set the ramp time in milliseconds (negative clamps to 0).
    ///
    /// Ramps in flight keep their step; only their completion point moves.
    pub fn set_ramp_ms(&mut self, ms: f64) {
        if ms.is_nan() || ms < 0.0 {
            log::warn!("Ramp time {ms} ms clamped to 0");
        }
        self.apply_ramp_ms(ms);
        log::debug!(
            "Encoder ramp: {} ms ({} samples)",
            self.ramp_ms,
            self.ramps.ramp_length()
        );
    }

    fn apply_ramp_ms(&mut self, ms: f64) {
        self.ramp_ms = if ms.is_nan() { 0.0 } else { ms.max(0.0) };
        self.config.ramp_ms = self.ramp_ms;
        self.ramps
            .set_ramp_length(ms_to_samples(self.ramp_ms, self.config.sample_rate));
    }

    /// Ramp time as last set, in milliseconds
    #[inline]
    pub fn ramp_ms(&self) -> f64 {
        self.ramp_ms
    }

    /// Set the ramp length directly in samples (at least 1)
    pub fn set_ramp_samples(&mut self, samples: usize) {
        let samples = samples.max(1);
        self.ramp_ms = samples_to_ms(samples, self.config.sample_rate);
        self.config.ramp_ms = self.ramp_ms;
        self.ramps.set_ramp_length(samples);
        log::debug!("Encoder ramp: {samples} samples ({} ms)", self.ramp_ms);
    }

    #[inline]
    pub fn ramp_samples(&self) -> usize {
        self.ramps.ramp_length()
    }

    /// Change the sample rate; the ramp time in ms is kept
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> SpatialResult<()> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SpatialError::InvalidConfiguration(format!(
                "sample rate must be positive, got {sample_rate}"
            )));
        }
        self.config.sample_rate = sample_rate;
        self.ramps
            .set_ramp_length(ms_to_samples(self.ramp_ms, sample_rate));
        for air in &mut self.air {
            air.set_sample_rate(sample_rate);
        }
        log::debug!(
            "Encoder sample rate {sample_rate} Hz, ramp {} samples",
            self.ramps.ramp_length()
        );
        Ok(())
    }

    /// Clear filter state
    pub fn reset(&mut self) {
        for air in &mut self.air {
            air.reset();
        }
    }

    // ============ Control Queue ============

    /// Apply every queued control command
    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.pop() {
            // Source indices were checked when the command was queued
            let _ = self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: ControlCommand) -> SpatialResult<()> {
        match command {
            ControlCommand::Radius {
                source,
                radius,
                transition,
            } => match transition {
                Transition::Ramped => self.set_radius(source, radius),
                Transition::Direct => self.set_radius_direct(source, radius),
            },
            ControlCommand::Azimuth {
                source,
                azimuth,
                transition,
            } => match transition {
                Transition::Ramped => self.set_azimuth(source, azimuth),
                Transition::Direct => self.set_azimuth_direct(source, azimuth),
            },
            ControlCommand::Polar {
                source,
                radius,
                azimuth,
                transition,
            } => match transition {
                Transition::Ramped => self.set_polar(source, radius, azimuth),
                Transition::Direct => self.set_polar_direct(source, radius, azimuth),
            },
            ControlCommand::Cartesian {
                source,
                abscissa,
                ordinate,
                transition,
            } => match transition {
                Transition::Ramped => self.set_cartesian(source, abscissa, ordinate),
                Transition::Direct => self.set_cartesian_direct(source, abscissa, ordinate),
            },
            ControlCommand::Mute { source, muted } => self.set_mute(source, muted),
            ControlCommand::RampMs(ms) => {
                self.apply_ramp_ms(ms);
                Ok(())
            }
        }
    }

    // ============ Frame Processing ============

    fn check_frame(&self, inputs: &[Sample], outputs: &[Sample]) -> SpatialResult<()> {
        let sources = self.number_of_sources();
        if inputs.len() < sources {
            return Err(SpatialError::BufferSizeMismatch {
                expected: sources,
                got: inputs.len(),
            });
        }
        let harmonics = self.number_of_harmonics();
        if outputs.len() < harmonics {
            return Err(SpatialError::BufferSizeMismatch {
                expected: harmonics,
                got: outputs.len(),
            });
        }
        Ok(())
    }

    /// Encode one sample of every source, overwriting `outputs`.
    ///
    /// `inputs` holds one sample per source, `outputs` one per harmonic.
    pub fn process_frame(&mut self, inputs: &[Sample], outputs: &mut [Sample]) -> SpatialResult<()> {
        self.check_frame(inputs, outputs)?;
        let harmonics = self.number_of_harmonics();
        outputs[..harmonics].fill(0.0);
        self.render_frame(inputs, outputs);
        Ok(())
    }

    /// Encode one sample of every source, adding into `outputs`
    pub fn process_frame_add(
        &mut self,
        inputs: &[Sample],
        outputs: &mut [Sample],
    ) -> SpatialResult<()> {
        self.check_frame(inputs, outputs)?;
        self.render_frame(inputs, outputs);
        Ok(())
    }

    /// Single-source shorthand for [`process_frame`](Self::process_frame)
    pub fn process_sample(&mut self, input: Sample, outputs: &mut [Sample]) -> SpatialResult<()> {
        self.process_frame(std::slice::from_ref(&input), outputs)
    }

    /// Single-source shorthand for [`process_frame_add`](Self::process_frame_add)
    pub fn process_sample_add(
        &mut self,
        input: Sample,
        outputs: &mut [Sample],
    ) -> SpatialResult<()> {
        self.process_frame_add(std::slice::from_ref(&input), outputs)
    }

    fn render_frame(&mut self, inputs: &[Sample], outputs: &mut [Sample]) {
        self.drain_commands();
        self.ramps.process(&mut self.frame);

        let sources = self.muted.len();
        let harmonics = self.harmonics_frame.len();

        for source in 0..sources {
            if self.muted[source] {
                continue;
            }
            let radius = self.frame[source];
            let azimuth = self.frame[sources + source];

            let mut signal = inputs[source] * distance_gain(radius);
            if let Some(air) = self.air.get_mut(source) {
                signal = air.process(signal, radius);
            }

            self.basis.encode(signal, azimuth, &mut self.harmonics_frame);
            if let Some(wider) = &self.wider {
                wider.process(&mut self.harmonics_frame, radius);
            }
            add_into(&self.harmonics_frame, &mut outputs[..harmonics]);
        }
    }

    // ============ Block Processing ============

    /// Check planar buffers and return the block length
    fn check_block(&self, inputs: &[&[Sample]], outputs: &[&mut [Sample]]) -> SpatialResult<usize> {
        let sources = self.number_of_sources();
        let harmonics = self.number_of_harmonics();

        if inputs.len() < sources {
            return Err(SpatialError::BufferSizeMismatch {
                expected: sources,
                got: inputs.len(),
            });
        }
        if outputs.len() < harmonics {
            return Err(SpatialError::BufferSizeMismatch {
                expected: harmonics,
                got: outputs.len(),
            });
        }

        let frames = outputs[0].len();
        let lengths = inputs[..sources]
            .iter()
            .map(|c| c.len())
            .chain(outputs[..harmonics].iter().map(|c| c.len()));
        for len in lengths {
            if len != frames {
                return Err(SpatialError::BufferSizeMismatch {
                    expected: frames,
                    got: len,
                });
            }
        }
        Ok(frames)
    }

    /// Encode a block of every source, overwriting `outputs`.
    ///
    /// `inputs` has one channel per source, `outputs` one per harmonic, all
    /// of the same length. Long blocks are processed in chunks of
    /// `max_block_size`.
    pub fn process_block(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let frames = self.check_block(inputs, outputs)?;
        self.render_block(inputs, outputs, frames, false);
        Ok(())
    }

    /// Encode a block of every source, adding into `outputs`
    pub fn process_block_add(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let frames = self.check_block(inputs, outputs)?;
        self.render_block(inputs, outputs, frames, true);
        Ok(())
    }

    fn render_block(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        frames: usize,
        accumulate: bool,
    ) {
        self.drain_commands();

        let harmonics = self.number_of_harmonics();
        let mut start = 0;
        while start < frames {
            let len = self.config.max_block_size.min(frames - start);
            let end = start + len;

            self.advance_ramps(len);
            if !accumulate {
                for channel in outputs[..harmonics].iter_mut() {
                    channel[start..end].fill(0.0);
                }
            }

            for source in 0..self.muted.len() {
                if !self.muted[source] {
                    self.render_source(source, &inputs[source][start..end], outputs, start);
                }
            }
            start = end;
        }
    }

    /// Advance the ramp set `len` times into the per-source buffers
    fn advance_ramps(&mut self, len: usize) {
        let sources = self.muted.len();
        for t in 0..len {
            self.ramps.process(&mut self.frame);
            for source in 0..sources {
                self.radius_buffer[source][t] = self.frame[source];
                self.azimuth_buffer[source][t] = self.frame[sources + source];
            }
        }
    }

    /// Encode one source for one chunk and sum it into `outputs[..][start..]`
    fn render_source(
        &mut self,
        source: usize,
        input: &[Sample],
        outputs: &mut [&mut [Sample]],
        start: usize,
    ) {
        let len = input.len();
        let radius = &self.radius_buffer[source][..len];
        let azimuth = &self.azimuth_buffer[source][..len];

        for ((out, &dry), &r) in self.signal_buffer.iter_mut().zip(input).zip(radius) {
            *out = dry * distance_gain(r);
        }
        if let Some(air) = self.air.get_mut(source) {
            for (sample, &r) in self.signal_buffer[..len].iter_mut().zip(radius) {
                *sample = air.process(*sample, r);
            }
        }

        self.basis
            .encode_block(&self.signal_buffer[..len], azimuth, &mut self.harmonic_buffer);
        if let Some(wider) = &self.wider {
            wider.process_block(&mut self.harmonic_buffer, radius);
        }

        for (channel, encoded) in outputs.iter_mut().zip(&self.harmonic_buffer) {
            add_into(&encoded[..len], &mut channel[start..start + len]);
        }
    }

    // ============ Signal-Rate Control ============

    /// Encode one source with per-sample radius and azimuth signals.
    ///
    /// Only `source` is rendered and `outputs` is overwritten. Every ramp
    /// still advances once per sample; afterwards an unmuted source jumps to
    /// the last supplied position.
    pub fn process_block_polar(
        &mut self,
        source: usize,
        input: &[Sample],
        radius: &[Sample],
        azimuth: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Polar {
            radius: Some(radius),
            azimuth: Some(azimuth),
        };
        self.render_signal_block(source, input, control, outputs)
    }

    /// Encode one source with a per-sample radius; azimuth follows its ramp
    pub fn process_block_radius(
        &mut self,
        source: usize,
        input: &[Sample],
        radius: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Polar {
            radius: Some(radius),
            azimuth: None,
        };
        self.render_signal_block(source, input, control, outputs)
    }

    /// Encode one source with a per-sample azimuth; radius follows its ramp
    pub fn process_block_azimuth(
        &mut self,
        source: usize,
        input: &[Sample],
        azimuth: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Polar {
            radius: None,
            azimuth: Some(azimuth),
        };
        self.render_signal_block(source, input, control, outputs)
    }

    /// Encode one source with per-sample abscissa and ordinate signals
    pub fn process_block_cartesian(
        &mut self,
        source: usize,
        input: &[Sample],
        abscissa: &[Sample],
        ordinate: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Cartesian {
            abscissa: Some(abscissa),
            ordinate: Some(ordinate),
        };
        self.render_signal_block(source, input, control, outputs)
    }

    /// Encode one source with a per-sample abscissa; the ordinate is taken
    /// from the ramped position
    pub fn process_block_abscissa(
        &mut self,
        source: usize,
        input: &[Sample],
        abscissa: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Cartesian {
            abscissa: Some(abscissa),
            ordinate: None,
        };
        self.render_signal_block(source, input, control, outputs)
    }

    /// Encode one source with a per-sample ordinate; the abscissa is taken
    /// from the ramped position
    pub fn process_block_ordinate(
        &mut self,
        source: usize,
        input: &[Sample],
        ordinate: &[Sample],
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        let control = PositionSignal::Cartesian {
            abscissa: None,
            ordinate: Some(ordinate),
        };
        self.render_signal_block(source, input, control, outputs)
    }

    fn render_signal_block(
        &mut self,
        source: usize,
        input: &[Sample],
        control: PositionSignal<'_>,
        outputs: &mut [&mut [Sample]],
    ) -> SpatialResult<()> {
        self.check_source(source)?;

        let frames = input.len();
        for signal in control.signals().into_iter().flatten() {
            if signal.len() != frames {
                return Err(SpatialError::BufferSizeMismatch {
                    expected: frames,
                    got: signal.len(),
                });
            }
        }
        let harmonics = self.number_of_harmonics();
        if outputs.len() < harmonics {
            return Err(SpatialError::BufferSizeMismatch {
                expected: harmonics,
                got: outputs.len(),
            });
        }
        if let Some(channel) = outputs[..harmonics].iter().find(|c| c.len() != frames) {
            return Err(SpatialError::BufferSizeMismatch {
                expected: frames,
                got: channel.len(),
            });
        }

        self.drain_commands();

        let mut start = 0;
        let mut last = 0;
        while start < frames {
            let len = self.config.max_block_size.min(frames - start);
            let end = start + len;

            self.advance_ramps(len);
            self.apply_position_signal(source, control, start, len);

            for channel in outputs[..harmonics].iter_mut() {
                channel[start..end].fill(0.0);
            }
            if !self.muted[source] {
                self.render_source(source, &input[start..end], outputs, start);
            }
            last = len;
            start = end;
        }

        // A muted source is not rendered and keeps its ramped position
        if last == 0 || self.muted[source] {
            return Ok(());
        }
        let radius = self.radius_buffer[source][last - 1];
        let azimuth = self.azimuth_buffer[source][last - 1];
        let (moves_radius, moves_azimuth) = control.moves();
        if moves_radius {
            self.ramps.set_radius_direct(source, radius)?;
        }
        if moves_azimuth {
            self.ramps.set_azimuth_direct(source, azimuth)?;
        }
        Ok(())
    }

    /// Overwrite the ramped position of `source` for one chunk with the
    /// supplied signals
    fn apply_position_signal(
        &mut self,
        source: usize,
        control: PositionSignal<'_>,
        start: usize,
        len: usize,
    ) {
        let end = start + len;
        let radius = &mut self.radius_buffer[source][..len];
        let azimuth = &mut self.azimuth_buffer[source][..len];

        match control {
            PositionSignal::Polar {
                radius: radius_signal,
                azimuth: azimuth_signal,
            } => {
                if let Some(signal) = radius_signal {
                    for (slot, &r) in radius.iter_mut().zip(&signal[start..end]) {
                        *slot = r.max(0.0);
                    }
                }
                if let Some(signal) = azimuth_signal {
                    azimuth.copy_from_slice(&signal[start..end]);
                }
            }
            PositionSignal::Cartesian {
                abscissa: abscissa_signal,
                ordinate: ordinate_signal,
            } => {
                for t in 0..len {
                    let (r, a) = (radius[t], azimuth[t]);
                    let x = abscissa_signal.map_or_else(|| abscissa(r, a), |x| x[start + t]);
                    let y = ordinate_signal.map_or_else(|| ordinate(r, a), |y| y[start + t]);
                    radius[t] = position::radius(x, y);
                    azimuth[t] = position::azimuth(x, y);
                }
            }
        }
    }
}

/// Per-sample position signals for one source
#[derive(Clone, Copy)]
enum PositionSignal<'a> {
    Polar {
        radius: Option<&'a [Sample]>,
        azimuth: Option<&'a [Sample]>,
    },
    Cartesian {
        abscissa: Option<&'a [Sample]>,
        ordinate: Option<&'a [Sample]>,
    },
}

impl<'a> PositionSignal<'a> {
    fn signals(&self) -> [Option<&'a [Sample]>; 2] {
        match *self {
            PositionSignal::Polar { radius, azimuth } => [radius, azimuth],
            PositionSignal::Cartesian { abscissa, ordinate } => [abscissa, ordinate],
        }
    }

    /// Which of `(radius, azimuth)` the signals drive
    fn moves(&self) -> (bool, bool) {
        match *self {
            PositionSignal::Polar { radius, azimuth } => (radius.is_some(), azimuth.is_some()),
            PositionSignal::Cartesian { .. } => (true, true),
        }
    }
}
