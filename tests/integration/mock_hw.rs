//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers.  Encoder counts come
//! from a real [`PulseCounter`] that the test feeds edges into.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use motor_rig::app::events::AppEvent;
use motor_rig::app::ports::{ActuatorPort, EncoderPort, EventSink, LinkPort};
use motor_rig::app::service::{Outcome, RigService};
use motor_rig::drivers::motor::{MotorChannel, clamp_intensity};
use motor_rig::drivers::servo::clamp_angle;
use motor_rig::sensors::encoder::{ChannelSelect, EncoderSnapshot, PulseCounter};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigCall {
    Drive {
        channel: MotorChannel,
        intensity: u8,
        invert: bool,
    },
    Stop(MotorChannel),
    Servo(u8),
    ResetCounts,
}

// ── MockRig ───────────────────────────────────────────────────

pub struct MockRig<'a> {
    pub counter: &'a PulseCounter,
    pub calls: Vec<RigCall>,
}

#[allow(dead_code)]
impl<'a> MockRig<'a> {
    pub fn new(counter: &'a PulseCounter) -> Self {
        Self {
            counter,
            calls: Vec::new(),
        }
    }

    /// Last commanded servo angle.
    pub fn servo(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            RigCall::Servo(angle) => Some(*angle),
            _ => None,
        })
    }

    /// Current intensity of a channel (0 once stopped).
    pub fn intensity(&self, channel: MotorChannel) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match *c {
                RigCall::Drive {
                    channel: ch,
                    intensity,
                    ..
                } if ch == channel => Some(intensity),
                RigCall::Stop(ch) if ch == channel => Some(0),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn drives(&self) -> Vec<RigCall> {
        self.calls
            .iter()
            .copied()
            .filter(|c| matches!(c, RigCall::Drive { .. }))
            .collect()
    }

    pub fn servo_history(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RigCall::Servo(angle) => Some(*angle),
                _ => None,
            })
            .collect()
    }
}

impl ActuatorPort for MockRig<'_> {
    fn drive_motor(&mut self, channel: MotorChannel, intensity: i32, invert: bool) {
        self.calls.push(RigCall::Drive {
            channel,
            intensity: clamp_intensity(intensity),
            invert,
        });
    }

    fn stop_motor(&mut self, channel: MotorChannel) {
        self.calls.push(RigCall::Stop(channel));
    }

    fn set_servo(&mut self, angle: i32) -> u8 {
        let angle = clamp_angle(angle);
        self.calls.push(RigCall::Servo(angle));
        angle
    }
}

impl EncoderPort for MockRig<'_> {
    fn reset_counts(&mut self) {
        self.calls.push(RigCall::ResetCounts);
        self.counter.reset(ChannelSelect::All);
    }

    fn counts(&self) -> EncoderSnapshot {
        self.counter.snapshot()
    }
}

// ── Recording event sink ──────────────────────────────────────

/// Keeps every event and its rendered wire line.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
        self.lines.push(event.to_line().to_string());
    }
}

// ── Mock host link ────────────────────────────────────────────

/// Receive queue shared between a [`MockLink`] and whatever feeds it.
pub type RxQueue = Rc<RefCell<VecDeque<u8>>>;

/// Host link with a byte queue on the receive side and a
/// [`RecordingSink`] on the transmit side.
#[derive(Default)]
pub struct MockLink {
    pub rx: RxQueue,
    pub sink: RecordingSink,
    pub discards: u32,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, text: &str) {
        self.rx.borrow_mut().extend(text.bytes());
    }

    pub fn queued(&self) -> usize {
        self.rx.borrow().len()
    }
}

impl LinkPort for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        let mut rx = self.rx.borrow_mut();
        let n = buf.len().min(rx.len());
        for (slot, byte) in buf.iter_mut().zip(rx.drain(..n)) {
            *slot = byte;
        }
        n
    }

    fn discard_input(&mut self) {
        self.rx.borrow_mut().clear();
        self.discards += 1;
    }
}

impl EventSink for MockLink {
    fn emit(&mut self, event: &AppEvent) {
        self.sink.emit(event);
    }
}

// ── Delays ────────────────────────────────────────────────────

/// Returns immediately, recording the requested waits.
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// Simulates the motors turning: every wait of `dwell_ms` delivers
/// `(a, b) * step` edges (step counted from 1), every other wait
/// delivers `noise` edges to each channel.
pub struct EdgeDelay<'a> {
    pub counter: &'a PulseCounter,
    pub dwell_ms: u32,
    pub per_step: (u32, u32),
    pub noise: u32,
    pub steps: u32,
    pub waits_ms: Vec<u32>,
}

#[allow(dead_code)]
impl<'a> EdgeDelay<'a> {
    pub fn new(counter: &'a PulseCounter, dwell_ms: u32) -> Self {
        Self {
            counter,
            dwell_ms,
            per_step: (10, 20),
            noise: 7,
            steps: 0,
            waits_ms: Vec::new(),
        }
    }

    /// Edges delivered during the dwell of step `step` (1-based).
    pub fn expected(&self, step: u32) -> EncoderSnapshot {
        EncoderSnapshot {
            a: (self.per_step.0 * step) as i32,
            b: (self.per_step.1 * step) as i32,
        }
    }

    fn pulse(&self, channel: MotorChannel, n: u32) {
        for _ in 0..n {
            self.counter.on_edge(channel);
        }
    }
}

impl DelayNs for EdgeDelay<'_> {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
        if ms == self.dwell_ms {
            self.steps += 1;
            self.pulse(MotorChannel::A, self.per_step.0 * self.steps);
            self.pulse(MotorChannel::B, self.per_step.1 * self.steps);
        } else {
            self.pulse(MotorChannel::A, self.noise);
            self.pulse(MotorChannel::B, self.noise);
        }
    }
}

/// Queues `text` on a link during the first wait, like a host that keeps
/// typing while a sweep runs.
pub struct QueueingDelay {
    rx: RxQueue,
    text: Option<&'static str>,
    pub waits_ms: Vec<u32>,
}

#[allow(dead_code)]
impl QueueingDelay {
    pub fn new(link: &MockLink, text: &'static str) -> Self {
        Self {
            rx: Rc::clone(&link.rx),
            text: Some(text),
            waits_ms: Vec::new(),
        }
    }
}

impl DelayNs for QueueingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
        if let Some(text) = self.text.take() {
            self.rx.borrow_mut().extend(text.bytes());
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Feed `text` byte by byte; returns every non-pending outcome.
#[allow(dead_code)]
pub fn send<D: DelayNs>(
    svc: &mut RigService,
    text: &str,
    hw: &mut MockRig<'_>,
    delay: &mut D,
    sink: &mut RecordingSink,
) -> Vec<Outcome> {
    text.bytes()
        .map(|b| svc.feed_byte(b, hw, delay, sink))
        .filter(|o| *o != Outcome::Pending)
        .collect()
}
