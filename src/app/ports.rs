//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RigService (domain)
//! ```
//!
//! Adapters (actuators, encoders, the host link) implement these
//! traits.  The [`RigService`](super::service::RigService) consumes them
//! via generics, so the domain core never touches hardware directly.

use crate::drivers::motor::MotorChannel;
use crate::sensors::encoder::EncoderSnapshot;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Drive one motor.  `intensity` is clamped by the implementation;
    /// `invert` swaps the asserted direction output.
    fn drive_motor(&mut self, channel: MotorChannel, intensity: i32, invert: bool);

    /// Release both direction outputs and zero the duty of one motor.
    fn stop_motor(&mut self, channel: MotorChannel);

    /// Position the servo.  Returns the angle actually applied.
    fn set_servo(&mut self, angle: i32) -> u8;

    /// Stop both motors.
    fn all_off(&mut self) {
        for channel in MotorChannel::ALL {
            self.stop_motor(channel);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Encoder port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port over the interrupt-fed pulse counters.
pub trait EncoderPort {
    /// Zero both counters atomically.
    fn reset_counts(&mut self);

    /// Consistent snapshot of both counters.
    fn counts(&self) -> EncoderSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Link port (driving adapter: host link → domain)
// ───────────────────────────────────────────────────────────────

/// Receive side of the host link.
pub trait LinkPort {
    /// Non-blocking read of whatever has arrived.  Returns the byte count.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Drop everything queued but not yet read.
    fn discard_input(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → host link / log)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  The
/// serial adapter writes each one as a reply line.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
