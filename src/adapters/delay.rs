//! Blocking delay that keeps the task watchdog fed.
//!
//! The calibration sweep blocks for seconds at a time.  Wrapping the
//! platform delay in [`WatchdogDelay`] splits every `delay_ms` into
//! slices no longer than `slice_ms` and feeds the [`Watchdog`] after each.

use embedded_hal::delay::DelayNs;

use crate::drivers::watchdog::Watchdog;

/// Longest uninterrupted wait; well inside the watchdog timeout.
pub const DEFAULT_SLICE_MS: u32 = 1_000;

pub struct WatchdogDelay<'a, D> {
    inner: D,
    watchdog: &'a Watchdog,
    slice_ms: u32,
}

impl<'a, D: DelayNs> WatchdogDelay<'a, D> {
    pub fn new(inner: D, watchdog: &'a Watchdog) -> Self {
        Self::with_slice(inner, watchdog, DEFAULT_SLICE_MS)
    }

    pub fn with_slice(inner: D, watchdog: &'a Watchdog, slice_ms: u32) -> Self {
        Self {
            inner,
            watchdog,
            slice_ms: slice_ms.max(1),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: DelayNs> DelayNs for WatchdogDelay<'_, D> {
    fn delay_ns(&mut self, ns: u32) {
        // At most ~4.3 s; only reached through delay_us / direct calls.
        self.inner.delay_ns(ns);
        self.watchdog.feed();
    }

    fn delay_ms(&mut self, mut ms: u32) {
        while ms > 0 {
            let slice = ms.min(self.slice_ms);
            self.inner.delay_ms(slice);
            self.watchdog.feed();
            ms -= slice;
        }
    }
}
