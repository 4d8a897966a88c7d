//! Outbound application events.
//!
//! The [`RigService`](super::service::RigService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Their `Display` form is
//! the exact reply text sent on the host link (without the terminator).

use core::fmt::{self, Write as _};

use crate::app::calibration::SweepStep;
use crate::sensors::encoder::EncoderSnapshot;

use super::commands::Trigger;

/// Capacity of a rendered event line.  The usage banner is the longest.
pub const EVENT_LINE_CAPACITY: usize = 96;

pub const USAGE_BANNER: &str =
    "Format: MA:speed,MB:speed,S:servo  OR  ENC:RESET  OR  ENC:READ  OR  START";

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot finished; the usage banner goes out.
    Ready,

    /// Reply to `ENC:RESET`.
    EncodersReset,

    /// Reply to `ENC:READ`.
    EncoderCounts(EncoderSnapshot),

    /// Reply to a drive line, carrying the values actually applied.
    Applied { motor_a: u8, motor_b: u8, servo: u8 },

    /// Reply to any line that did not parse.
    UnknownCommand,

    CalibrationStarted(Trigger),

    /// One completed sweep step.
    CalibrationStep(SweepStep),

    /// Sweep done, servo back at neutral; carries the last step's counts.
    CalibrationFinished(EncoderSnapshot),
}

impl AppEvent {
    /// Render to a fixed-capacity buffer.
    pub fn to_line(&self) -> heapless::String<EVENT_LINE_CAPACITY> {
        let mut line = heapless::String::new();
        // Every variant fits: the banner is 73 bytes, the widest numeric
        // reply (a step with two i32::MIN counts) is 50.
        let _ = write!(line, "{self}");
        line
    }
}

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str(USAGE_BANNER),
            Self::EncodersReset => f.write_str("ENC:OK"),
            Self::EncoderCounts(c) => write!(f, "ENC:A:{},B:{}", c.a, c.b),
            Self::Applied {
                motor_a,
                motor_b,
                servo,
            } => write!(f, "Applied -> MA:{motor_a}, MB:{motor_b}, Servo:{servo}"),
            Self::UnknownCommand => f.write_str("ERR:UNKNOWN_CMD"),
            Self::CalibrationStarted(trigger) => write!(f, "CAL:START:{trigger}"),
            Self::CalibrationStep(s) => write!(
                f,
                "CAL:STEP:PWM:{},A:{},B:{},S:{}",
                s.intensity, s.counts.a, s.counts.b, s.servo
            ),
            Self::CalibrationFinished(c) => write!(f, "CAL:DONE:A:{},B:{}", c.a, c.b),
        }
    }
}
