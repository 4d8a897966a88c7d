//! System configuration parameters
//!
//! All tunable parameters for the rig.  Values are compiled in; there is
//! no persistent store, so a reset always returns to [`RigConfig::default`].

use serde::{Deserialize, Serialize};

use crate::drivers::motor::MAX_INTENSITY;
use crate::drivers::servo::MAX_ANGLE;

/// Upper bound on steps in one calibration sweep (fixed report capacity).
pub const MAX_SWEEP_STEPS: usize = 16;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    // --- Motors ---
    /// Encoder counts per output-shaft revolution, motor A
    pub counts_per_rev_a: u32,
    /// Encoder counts per output-shaft revolution, motor B
    pub counts_per_rev_b: u32,
    /// Motor A is mounted mirrored and driven with inverted direction outputs
    pub invert_a: bool,
    /// Motor B direction inversion
    pub invert_b: bool,

    // --- Servo ---
    /// Position commanded at boot (degrees)
    pub servo_home_deg: u8,

    // --- Start switch ---
    /// Debounce window (milliseconds)
    pub debounce_ms: u32,

    // --- Calibration ---
    pub sweep: SweepPlan,
}

/// Fixed grid the calibration sweep walks through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// First drive intensity
    pub intensity_start: u8,
    /// Last drive intensity (inclusive, if on the grid)
    pub intensity_end: u8,
    /// Intensity increment between steps
    pub intensity_step: u8,
    /// Time both motors run at each step (milliseconds)
    pub dwell_ms: u32,
    /// Pause after each step before the next (milliseconds)
    pub settle_ms: u32,
    /// Servo position at sweep start (degrees)
    pub servo_min_deg: u8,
    /// Servo never advances past this (degrees)
    pub servo_max_deg: u8,
    /// Servo advance per step (degrees)
    pub servo_step_deg: u8,
    /// Servo position after the sweep (degrees)
    pub servo_neutral_deg: u8,
}

impl SweepPlan {
    /// Drive intensities visited, in order.
    pub fn intensities(&self) -> impl Iterator<Item = u8> {
        (self.intensity_start..=self.intensity_end).step_by(usize::from(self.intensity_step.max(1)))
    }

    pub fn step_count(&self) -> usize {
        if self.intensity_start > self.intensity_end || self.intensity_step == 0 {
            return 0;
        }
        usize::from((self.intensity_end - self.intensity_start) / self.intensity_step) + 1
    }

    /// Servo position after advancing from `current`, clamped to the safe maximum.
    pub fn next_servo(&self, current: u8) -> u8 {
        current.saturating_add(self.servo_step_deg).min(self.servo_max_deg)
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            intensity_start: 50,
            intensity_end: 150,
            intensity_step: 25,
            dwell_ms: 2000,
            settle_ms: 500,
            servo_min_deg: 40,
            servo_max_deg: 140,
            servo_step_deg: 20,
            servo_neutral_deg: 90,
        }
    }
}

/// Errors from [`RigConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl RigConfig {
    /// Requested-intensity multiplier for motor B so both wheels cover
    /// the same distance per unit of drive (`counts_per_rev_a / counts_per_rev_b`).
    pub fn motor_b_ratio(&self) -> f32 {
        self.counts_per_rev_a as f32 / self.counts_per_rev_b as f32
    }

    /// Apply the motor B ratio to a requested intensity (truncating).
    pub fn correct_motor_b(&self, requested: i32) -> i32 {
        (requested as f32 * self.motor_b_ratio()) as i32
    }

    /// Reject values that would drive hardware outside its safe envelope.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counts_per_rev_a == 0 || self.counts_per_rev_b == 0 {
            return Err(ConfigError::ValidationFailed("counts_per_rev must be non-zero"));
        }
        if self.servo_home_deg > MAX_ANGLE {
            return Err(ConfigError::ValidationFailed("servo_home_deg above 180"));
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationFailed("debounce_ms must be non-zero"));
        }

        let s = &self.sweep;
        if s.intensity_step == 0 {
            return Err(ConfigError::ValidationFailed("sweep.intensity_step must be non-zero"));
        }
        if s.intensity_start > s.intensity_end {
            return Err(ConfigError::ValidationFailed("sweep.intensity_start above intensity_end"));
        }
        if s.intensity_end > MAX_INTENSITY {
            return Err(ConfigError::ValidationFailed("sweep.intensity_end above MAX_INTENSITY"));
        }
        if s.step_count() > MAX_SWEEP_STEPS {
            return Err(ConfigError::ValidationFailed("sweep has too many steps"));
        }
        if s.servo_min_deg > s.servo_max_deg {
            return Err(ConfigError::ValidationFailed("sweep.servo_min_deg above servo_max_deg"));
        }
        if s.servo_max_deg > MAX_ANGLE || s.servo_neutral_deg > MAX_ANGLE {
            return Err(ConfigError::ValidationFailed("sweep servo angle above 180"));
        }
        Ok(())
    }
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            // Motors
            counts_per_rev_a: 4399,
            counts_per_rev_b: 4155,
            invert_a: true,
            invert_b: false,

            // Servo
            servo_home_deg: 81,

            // Switch
            debounce_ms: 50,

            sweep: SweepPlan::default(),
        }
    }
}
