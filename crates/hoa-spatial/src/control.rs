//! Lock-free parameter handoff
//!
//! The encoder lives on the audio thread. Parameter changes from any other
//! thread go through an `rtrb` single-producer single-consumer queue and are
//! applied at the start of the next process call, so no parameter slot is
//! ever written by two threads.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::error::{SpatialError, SpatialResult};

/// How a new value is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Ramp over the configured ramp time
    Ramped,
    /// Jump immediately
    Direct,
}

/// Parameter change for one encoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    Radius {
        source: usize,
        radius: f64,
        transition: Transition,
    },
    Azimuth {
        source: usize,
        azimuth: f64,
        transition: Transition,
    },
    Polar {
        source: usize,
        radius: f64,
        azimuth: f64,
        transition: Transition,
    },
    Cartesian {
        source: usize,
        abscissa: f64,
        ordinate: f64,
        transition: Transition,
    },
    Mute { source: usize, muted: bool },
    /// New ramp time in milliseconds
    RampMs(f64),
}

impl ControlCommand {
    /// Source the command targets, if any
    pub fn source(&self) -> Option<usize> {
        match *self {
            ControlCommand::Radius { source, .. }
            | ControlCommand::Azimuth { source, .. }
            | ControlCommand::Polar { source, .. }
            | ControlCommand::Cartesian { source, .. }
            | ControlCommand::Mute { source, .. } => Some(source),
            ControlCommand::RampMs(_) => None,
        }
    }
}

/// Create a command queue for an encoder with `number_of_sources` slots
pub(crate) fn control_queue(
    capacity: usize,
    number_of_sources: usize,
) -> (EncoderControl, Consumer<ControlCommand>) {
    let (producer, consumer) = RingBuffer::new(capacity.max(1));
    (
        EncoderControl {
            producer,
            number_of_sources,
        },
        consumer,
    )
}

/// Control-thread handle for one encoder
pub struct EncoderControl {
    producer: Producer<ControlCommand>,
    number_of_sources: usize,
}

impl EncoderControl {
    /// Queue a command.
    ///
    /// Source indices are checked here, so the audio thread never sees an
    /// invalid one. Negative radii are clamped to 0.
    pub fn push(&mut self, command: ControlCommand) -> SpatialResult<()> {
        if let Some(index) = command.source() {
            if index >= self.number_of_sources {
                return Err(SpatialError::SourceOutOfRange {
                    index,
                    count: self.number_of_sources,
                });
            }
        }

        let command = match command {
            ControlCommand::Radius {
                source,
                radius,
                transition,
            } => ControlCommand::Radius {
                source,
                radius: clamp_radius(radius),
                transition,
            },
            ControlCommand::Polar {
                source,
                radius,
                azimuth,
                transition,
            } => ControlCommand::Polar {
                source,
                radius: clamp_radius(radius),
                azimuth,
                transition,
            },
            other => other,
        };

        self.producer.push(command).map_err(|_| {
            log::warn!("Encoder control queue full, dropping {command:?}");
            SpatialError::ControlQueueFull
        })
    }

    pub fn set_radius(&mut self, source: usize, radius: f64) -> SpatialResult<()> {
        self.push(ControlCommand::Radius {
            source,
            radius,
            transition: Transition::Ramped,
        })
    }

    pub fn set_radius_direct(&mut self, source: usize, radius: f64) -> SpatialResult<()> {
        self.push(ControlCommand::Radius {
            source,
            radius,
            transition: Transition::Direct,
        })
    }

    pub fn set_azimuth(&mut self, source: usize, azimuth: f64) -> SpatialResult<()> {
        self.push(ControlCommand::Azimuth {
            source,
            azimuth,
            transition: Transition::Ramped,
        })
    }

    pub fn set_azimuth_direct(&mut self, source: usize, azimuth: f64) -> SpatialResult<()> {
        self.push(ControlCommand::Azimuth {
            source,
            azimuth,
            transition: Transition::Direct,
        })
    }

    pub fn set_polar(&mut self, source: usize, radius: f64, azimuth: f64) -> SpatialResult<()> {
        self.push(ControlCommand::Polar {
            source,
            radius,
            azimuth,
            transition: Transition::Ramped,
        })
    }

    pub fn set_polar_direct(
        &mut self,
        source: usize,
        radius: f64,
        azimuth: f64,
    ) -> SpatialResult<()> {
        self.push(ControlCommand::Polar {
            source,
            radius,
            azimuth,
            transition: Transition::Direct,
        })
    }

    pub fn set_cartesian(
        &mut self,
        source: usize,
        abscissa: f64,
        ordinate: f64,
    ) -> SpatialResult<()> {
        self.push(ControlCommand::Cartesian {
            source,
            abscissa,
            ordinate,
            transition: Transition::Ramped,
        })
    }

    pub fn set_cartesian_direct(
        &mut self,
        source: usize,
        abscissa: f64,
        ordinate: f64,
    ) -> SpatialResult<()> {
        self.push(ControlCommand::Cartesian {
            source,
            abscissa,
            ordinate,
            transition: Transition::Direct,
        })
    }

    pub fn set_mute(&mut self, source: usize, muted: bool) -> SpatialResult<()> {
        self.push(ControlCommand::Mute { source, muted })
    }

    pub fn set_ramp_ms(&mut self, ms: f64) -> SpatialResult<()> {
        self.push(ControlCommand::RampMs(ms))
    }

    /// Free slots left in the queue
    pub fn available(&self) -> usize {
        self.producer.slots()
    }

    #[inline]
    pub fn number_of_sources(&self) -> usize {
        self.number_of_sources
    }
}

fn clamp_radius(radius: f64) -> f64 {
    if radius.is_nan() || radius < 0.0 {
        log::warn!("Radius {radius} clamped to 0");
        0.0
    } else {
        radius
    }
}
