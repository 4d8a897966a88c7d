//! Hobby servo driver on a 50 Hz LEDC channel.
//!
//! Angles are clamped to `0..=180` degrees and mapped linearly onto a
//! 544–2400 µs pulse, the range used by the common Arduino-style servo
//! libraries for SG90/MG996R class parts.  Narrower safe ranges (e.g.
//! during a calibration sweep) are enforced by the caller.

use crate::drivers::hw_init;
use crate::pins;

pub const MIN_ANGLE: u8 = 0;
pub const MAX_ANGLE: u8 = 180;

const MIN_PULSE_US: u32 = 544;
const MAX_PULSE_US: u32 = 2400;
const PERIOD_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;
const MAX_DUTY: u32 = (1 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;

/// Clamp a requested angle into `MIN_ANGLE..=MAX_ANGLE`.
pub fn clamp_angle(requested: i32) -> u8 {
    requested.clamp(i32::from(MIN_ANGLE), i32::from(MAX_ANGLE)) as u8
}

/// Pulse width in microseconds for an angle.
pub fn angle_to_pulse_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE)
}

/// LEDC duty register value for an angle.
pub fn angle_to_duty(angle: u8) -> u32 {
    angle_to_pulse_us(angle) * MAX_DUTY / PERIOD_US
}

pub struct ServoDriver {
    ledc_channel: u32,
    angle: Option<u8>,
}

impl ServoDriver {
    pub fn new() -> Self {
        Self {
            ledc_channel: hw_init::LEDC_CH_SERVO,
            angle: None,
        }
    }

    /// Command a new position.  Returns the angle actually applied.
    pub fn set_angle(&mut self, target: i32) -> u8 {
        let angle = clamp_angle(target);
        hw_init::ledc_set(self.ledc_channel, angle_to_duty(angle));
        self.angle = Some(angle);
        angle
    }

    /// Last commanded angle, `None` before the first command.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}

impl Default for ServoDriver {
    fn default() -> Self {
        Self::new()
    }
}
