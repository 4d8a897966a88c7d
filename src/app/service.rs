//! Application service: the hexagonal core.
//!
//! [`RigService`] owns the configuration and the link's line assembler.
//! It turns link bytes and switch edges into actuator commands and reply
//! events.  All I/O flows through port traits injected at call sites,
//! making the entire service testable with mock adapters.
//!
//! ```text
//!    link bytes ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  switch edges ──▶ │       RigService        │
//!                   │  framing · parse · cal  │ ──▶ ActuatorPort
//!   EncoderPort ◀──▶└────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::RigConfig;
use crate::drivers::motor::{MotorChannel, clamp_intensity};
use crate::drivers::servo::clamp_angle;
use crate::drivers::switch::Edge;
use crate::error;
use crate::protocol::command::{ParseError, parse_line};
use crate::protocol::line::{LineAssembler, LineEvent};

use super::calibration::{SweepReport, run_sweep};
use super::commands::{AppCommand, DriveRequest, Trigger};
use super::events::AppEvent;
use super::ports::{ActuatorPort, EncoderPort, EventSink, LinkPort};

/// Bytes taken from the link per [`RigService::poll_once`].
pub const RX_CHUNK: usize = 64;

/// What a call into the service did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing yet (byte buffered, or an ignored edge).
    Pending,
    /// A command ran and its reply was emitted.
    Replied,
    /// The line was rejected with `ERR:UNKNOWN_CMD`; nothing was touched.
    Rejected(ParseError),
    /// A calibration sweep ran to completion.
    Swept(SweepReport),
}

// ───────────────────────────────────────────────────────────────
// RigService
// ───────────────────────────────────────────────────────────────

pub struct RigService {
    config: RigConfig,
    assembler: LineAssembler,
    sweeps: u32,
}

impl RigService {
    /// Construct the service.  Refuses a configuration that fails
    /// [`RigConfig::validate`].
    pub fn new(config: RigConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            assembler: LineAssembler::new(),
            sweeps: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Home the servo, make sure both motors are off, announce the usage banner.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        let home = hw.set_servo(i32::from(self.config.servo_home_deg));
        info!("RigService started, servo home at {home}");
        sink.emit(&AppEvent::Ready);
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Feed one byte received on the host link.
    pub fn feed_byte<H, D, S>(&mut self, byte: u8, hw: &mut H, delay: &mut D, sink: &mut S) -> Outcome
    where
        H: ActuatorPort + EncoderPort,
        D: DelayNs,
        S: EventSink,
    {
        let parsed = match self.assembler.push(byte) {
            None => return Outcome::Pending,
            Some(LineEvent::Line(line)) => {
                parse_line(line).inspect_err(|e| warn!("Rejected line {line:?}: {e}"))
            }
            Some(LineEvent::Overflow { dropped }) => {
                warn!("Rejected line: {dropped} bytes over capacity");
                Err(ParseError::LineTooLong)
            }
            Some(LineEvent::NotAscii) => {
                warn!("Rejected line: non-ASCII input");
                Err(ParseError::NotAscii)
            }
        };

        match parsed {
            Ok(cmd) => self.handle_command(cmd, hw, delay, sink),
            Err(e) => {
                sink.emit(&AppEvent::UnknownCommand);
                Outcome::Rejected(e)
            }
        }
    }

    /// React to a debounced switch edge.  Only a press starts a sweep.
    pub fn on_switch_edge<H, D, S>(&mut self, edge: Edge, hw: &mut H, delay: &mut D, sink: &mut S) -> Outcome
    where
        H: ActuatorPort + EncoderPort,
        D: DelayNs,
        S: EventSink,
    {
        match edge {
            Edge::Falling => self.handle_command(AppCommand::StartCalibration(Trigger::Switch), hw, delay, sink),
            Edge::Rising => Outcome::Pending,
        }
    }

    /// One pass of the main loop: act on a switch edge, then drain up to
    /// [`RX_CHUNK`] link bytes.
    ///
    /// A completed sweep ends the pass.  Whatever the host queued while
    /// the sweep ran is discarded unread, including the rest of the
    /// current chunk, whichever input started the sweep.
    pub fn poll_once<L, H, D>(&mut self, edge: Option<Edge>, link: &mut L, hw: &mut H, delay: &mut D) -> Outcome
    where
        L: LinkPort + EventSink,
        H: ActuatorPort + EncoderPort,
        D: DelayNs,
    {
        let mut last = match edge {
            Some(edge) => self.on_switch_edge(edge, hw, delay, link),
            None => Outcome::Pending,
        };

        if !matches!(last, Outcome::Swept(_)) {
            let mut rx = [0u8; RX_CHUNK];
            let n = link.read(&mut rx);
            for &byte in &rx[..n] {
                match self.feed_byte(byte, hw, delay, link) {
                    Outcome::Pending => {}
                    out @ Outcome::Swept(_) => {
                        last = out;
                        break;
                    }
                    out => last = out,
                }
            }
        }

        if matches!(last, Outcome::Swept(_)) {
            link.discard_input();
        }
        last
    }

    // ── Command handling ──────────────────────────────────────

    /// Execute a parsed command.
    pub fn handle_command<H, D, S>(&mut self, cmd: AppCommand, hw: &mut H, delay: &mut D, sink: &mut S) -> Outcome
    where
        H: ActuatorPort + EncoderPort,
        D: DelayNs,
        S: EventSink,
    {
        match cmd {
            AppCommand::ResetEncoders => {
                hw.reset_counts();
                sink.emit(&AppEvent::EncodersReset);
            }
            AppCommand::ReadEncoders => {
                sink.emit(&AppEvent::EncoderCounts(hw.counts()));
            }
            AppCommand::Drive(req) => self.drive(req, hw, sink),
            AppCommand::StartCalibration(trigger) => {
                let c = &self.config;
                let report = run_sweep(&c.sweep, c.invert_a, c.invert_b, trigger, hw, delay, sink);
                self.assembler.reset();
                self.sweeps = self.sweeps.wrapping_add(1);
                return Outcome::Swept(report);
            }
        }
        Outcome::Replied
    }

    fn drive(&self, req: DriveRequest, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let motor_a = clamp_intensity(req.motor_a);
        let motor_b = clamp_intensity(self.config.correct_motor_b(req.motor_b));

        hw.drive_motor(MotorChannel::A, i32::from(motor_a), self.config.invert_a);
        hw.drive_motor(MotorChannel::B, i32::from(motor_b), self.config.invert_b);
        let servo = hw.set_servo(i32::from(clamp_angle(req.servo)));

        sink.emit(&AppEvent::Applied {
            motor_a,
            motor_b,
            servo,
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Completed calibration sweeps since boot.
    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    /// Bytes of the link line currently being assembled.
    pub fn pending_input(&self) -> usize {
        self.assembler.pending()
    }
}
