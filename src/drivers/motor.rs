//! Brushed DC motor channel driver (dual-input H-bridge).
//!
//! Each channel has two direction-select outputs and one LEDC PWM
//! intensity output.  Intensity is clamped to [`MAX_INTENSITY`] before
//! it reaches the PWM register.
//!
//! ## Wiring
//!
//! The two motors are mounted mirrored, so one channel is driven with
//! `invert = true` to make both wheels turn the same way.  `invert`
//! only swaps which direction output is asserted.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM and GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Highest intensity (8-bit PWM duty) the H-bridge is ever driven at.
pub const MAX_INTENSITY: u8 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorChannel {
    A,
    B,
}

impl MotorChannel {
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Output levels for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSignals {
    pub in_a: bool,
    pub in_b: bool,
    pub duty: u8,
}

impl DriveSignals {
    /// Both direction outputs released, zero duty.
    pub const STOPPED: Self = Self {
        in_a: false,
        in_b: false,
        duty: 0,
    };
}

/// Clamp a requested intensity into `0..=MAX_INTENSITY`.
pub fn clamp_intensity(requested: i32) -> u8 {
    requested.clamp(0, i32::from(MAX_INTENSITY)) as u8
}

/// Map a requested intensity and wiring inversion to output levels.
/// Exactly one direction output is asserted.
pub fn drive_signals(requested: i32, invert: bool) -> DriveSignals {
    DriveSignals {
        in_a: invert,
        in_b: !invert,
        duty: clamp_intensity(requested),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    /// `inverted` records which direction output the last drive asserted.
    Running { intensity: u8, inverted: bool },
}

struct MotorPins {
    in_a: i32,
    in_b: i32,
    ledc_channel: u32,
}

impl MotorPins {
    const fn for_channel(channel: MotorChannel) -> Self {
        match channel {
            MotorChannel::A => Self {
                in_a: pins::MOTOR_A_IN_A_GPIO,
                in_b: pins::MOTOR_A_IN_B_GPIO,
                ledc_channel: hw_init::LEDC_CH_MOTOR_A,
            },
            MotorChannel::B => Self {
                in_a: pins::MOTOR_B_IN_A_GPIO,
                in_b: pins::MOTOR_B_IN_B_GPIO,
                ledc_channel: hw_init::LEDC_CH_MOTOR_B,
            },
        }
    }
}

pub struct MotorDriver {
    pins: MotorPins,
    state: MotorState,
    signals: DriveSignals,
}

impl MotorDriver {
    pub fn new(channel: MotorChannel) -> Self {
        Self {
            pins: MotorPins::for_channel(channel),
            state: MotorState::Stopped,
            signals: DriveSignals::STOPPED,
        }
    }

    /// Drive at `intensity` (clamped).  A zero intensity still selects
    /// the direction but leaves the PWM output low.
    pub fn drive(&mut self, intensity: i32, invert: bool) {
        let signals = drive_signals(intensity, invert);
        self.apply_hw(signals);

        self.state = MotorState::Running {
            intensity: signals.duty,
            inverted: invert,
        };
    }

    pub fn stop(&mut self) {
        self.apply_hw(DriveSignals::STOPPED);
        self.state = MotorState::Stopped;
    }

    fn apply_hw(&mut self, signals: DriveSignals) {
        // Break before make: release the output that goes low first so the
        // bridge never sees both inputs high during a direction change.
        if signals.in_a {
            hw_init::gpio_write(self.pins.in_b, false);
            hw_init::gpio_write(self.pins.in_a, true);
        } else {
            hw_init::gpio_write(self.pins.in_a, false);
            hw_init::gpio_write(self.pins.in_b, signals.in_b);
        }
        hw_init::ledc_set(self.pins.ledc_channel, u32::from(signals.duty));
        self.signals = signals;
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Levels most recently written to the outputs.
    pub fn signals(&self) -> DriveSignals {
        self.signals
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }

    pub fn current_intensity(&self) -> u8 {
        self.signals.duty
    }
}
