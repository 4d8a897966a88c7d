//! Debounced start switch.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The level is polled from
//! the main loop; no interrupt is attached, contact bounce is filtered
//! entirely by the timer-based state machine below.
//!
//! ## Debounce
//!
//! Every change of the raw level restarts a candidate timer.  Once the
//! raw level has been unchanged for at least the debounce window and
//! differs from the stable level, it becomes the new stable level and a
//! single [`Edge`] is reported.  Glitches shorter than the window are
//! absorbed without an event.

use crate::drivers::hw_init;

/// Clean transition of the stable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// HIGH → LOW: switch pressed.
    Falling,
    /// LOW → HIGH: switch released.
    Rising,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    window_ms: u32,
    last_raw: bool,
    stable: bool,
    candidate_since_ms: u32,
}

impl Debouncer {
    /// `idle_high` is the level the input rests at (HIGH with a pull-up).
    pub fn new(window_ms: u32, idle_high: bool) -> Self {
        Self {
            window_ms,
            last_raw: idle_high,
            stable: idle_high,
            candidate_since_ms: 0,
        }
    }

    /// Feed one raw sample taken at `now_ms`.
    pub fn poll(&mut self, raw_high: bool, now_ms: u32) -> Option<Edge> {
        if raw_high != self.last_raw {
            self.candidate_since_ms = now_ms;
        }
        self.last_raw = raw_high;

        if raw_high == self.stable || now_ms.wrapping_sub(self.candidate_since_ms) < self.window_ms {
            return None;
        }

        self.stable = raw_high;
        Some(if raw_high { Edge::Rising } else { Edge::Falling })
    }

    /// Current debounced level.
    pub fn is_high(&self) -> bool {
        self.stable
    }
}

pub struct SwitchDriver {
    gpio: i32,
    debouncer: Debouncer,
}

impl SwitchDriver {
    pub fn new(gpio: i32, debounce_ms: u32) -> Self {
        Self {
            gpio,
            debouncer: Debouncer::new(debounce_ms, true),
        }
    }

    /// GPIO pin this switch is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Call from the main loop on every pass.
    pub fn poll(&mut self, now_ms: u32) -> Option<Edge> {
        self.debouncer.poll(hw_init::gpio_read(self.gpio), now_ms)
    }

    pub fn is_pressed(&self) -> bool {
        !self.debouncer.is_high()
    }
}
