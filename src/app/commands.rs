//! Inbound commands to the application service.
//!
//! Produced by [`parse_line`](crate::protocol::command::parse_line) for
//! link traffic, or directly by the main loop for the start switch.

use core::fmt;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Zero both encoder counters.
    ResetEncoders,

    /// Report a snapshot of both encoder counters.
    ReadEncoders,

    /// Drive both motors and position the servo.
    Drive(DriveRequest),

    /// Run the calibration sweep.
    StartCalibration(Trigger),
}

/// Raw values from a drive line, before ratio correction and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveRequest {
    pub motor_a: i32,
    pub motor_b: i32,
    pub servo: i32,
}

/// What started a calibration sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `START` received on the host link.
    Link,
    /// Falling edge of the start switch.
    Switch,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Link => "LINK",
            Self::Switch => "SWITCH",
        })
    }
}
