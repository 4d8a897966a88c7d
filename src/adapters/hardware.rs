//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns both motor drivers and the servo, and borrows the interrupt-fed
//! [`PulseCounter`], exposing them through [`ActuatorPort`] and
//! [`EncoderPort`].  On non-espidf targets the drivers use cfg-gated
//! simulation stubs, so the adapter itself runs unchanged on the host.

use crate::app::ports::{ActuatorPort, EncoderPort};
use crate::drivers::motor::{MotorChannel, MotorDriver};
use crate::drivers::servo::ServoDriver;
use crate::sensors::encoder::{ChannelSelect, EncoderSnapshot, PulseCounter};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<'a> {
    motor_a: MotorDriver,
    motor_b: MotorDriver,
    servo: ServoDriver,
    encoders: &'a PulseCounter,
}

impl<'a> HardwareAdapter<'a> {
    pub fn new(encoders: &'a PulseCounter) -> Self {
        Self {
            motor_a: MotorDriver::new(MotorChannel::A),
            motor_b: MotorDriver::new(MotorChannel::B),
            servo: ServoDriver::new(),
            encoders,
        }
    }

    pub fn motor(&self, channel: MotorChannel) -> &MotorDriver {
        match channel {
            MotorChannel::A => &self.motor_a,
            MotorChannel::B => &self.motor_b,
        }
    }

    fn motor_mut(&mut self, channel: MotorChannel) -> &mut MotorDriver {
        match channel {
            MotorChannel::A => &mut self.motor_a,
            MotorChannel::B => &mut self.motor_b,
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter<'_> {
    fn drive_motor(&mut self, channel: MotorChannel, intensity: i32, invert: bool) {
        self.motor_mut(channel).drive(intensity, invert);
    }

    fn stop_motor(&mut self, channel: MotorChannel) {
        self.motor_mut(channel).stop();
    }

    fn set_servo(&mut self, angle: i32) -> u8 {
        self.servo.set_angle(angle)
    }
}

// ── EncoderPort implementation ────────────────────────────────

impl EncoderPort for HardwareAdapter<'_> {
    fn reset_counts(&mut self) {
        self.encoders.reset(ChannelSelect::All);
    }

    fn counts(&self) -> EncoderSnapshot {
        self.encoders.snapshot()
    }
}
