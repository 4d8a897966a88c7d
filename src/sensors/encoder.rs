//! Interrupt-fed encoder pulse counters.
//!
//! Each motor's encoder phase A fires a GPIO interrupt on every rising
//! edge; the handler increments that motor's counter and nothing else.
//! The main loop resets and snapshots the counters.
//!
//! Both counters live behind one `critical_section::Mutex`, so every
//! access (increment, reset, snapshot) runs with edge delivery
//! suppressed.  A snapshot therefore always sees a consistent pair and
//! no increment is lost or counted twice across a reset.
//!
//! Phase B is wired but not decoded: counts only ever go up, whatever
//! the direction of rotation.  Overflow wraps (≈ 4.9 × 10⁵ revolutions
//! at 4399 counts/rev) and is not handled.

use core::cell::Cell;

use critical_section::Mutex;

use crate::drivers::motor::MotorChannel;

/// Consistent reading of both counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncoderSnapshot {
    pub a: i32,
    pub b: i32,
}

impl EncoderSnapshot {
    pub fn get(&self, channel: MotorChannel) -> i32 {
        match channel {
            MotorChannel::A => self.a,
            MotorChannel::B => self.b,
        }
    }
}

/// Which counters a reset applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelect {
    One(MotorChannel),
    All,
}

pub struct PulseCounter {
    counts: Mutex<Cell<[i32; 2]>>,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            counts: Mutex::new(Cell::new([0; 2])),
        }
    }

    /// Edge handler body.  Safe from interrupt context: no blocking, no
    /// allocation, no logging.
    #[inline]
    pub fn on_edge(&self, channel: MotorChannel) {
        critical_section::with(|cs| {
            let cell = self.counts.borrow(cs);
            let mut counts = cell.get();
            counts[channel.index()] = counts[channel.index()].wrapping_add(1);
            cell.set(counts);
        });
    }

    pub fn reset(&self, select: ChannelSelect) {
        critical_section::with(|cs| {
            let cell = self.counts.borrow(cs);
            match select {
                ChannelSelect::All => cell.set([0; 2]),
                ChannelSelect::One(channel) => {
                    let mut counts = cell.get();
                    counts[channel.index()] = 0;
                    cell.set(counts);
                }
            }
        });
    }

    pub fn snapshot(&self) -> EncoderSnapshot {
        let [a, b] = critical_section::with(|cs| self.counts.borrow(cs).get());
        EncoderSnapshot { a, b }
    }

    pub fn read(&self, channel: MotorChannel) -> i32 {
        self.snapshot().get(channel)
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters fed by the hardware edge interrupts.
/// `static` because ESP-IDF ISR callbacks cannot capture state.
pub static ENCODERS: PulseCounter = PulseCounter::new();

/// Called from the motor A encoder GPIO ISR on each rising edge.
pub fn motor_a_edge_isr() {
    ENCODERS.on_edge(MotorChannel::A);
}

/// Called from the motor B encoder GPIO ISR on each rising edge.
pub fn motor_b_edge_isr() {
    ENCODERS.on_edge(MotorChannel::B);
}
