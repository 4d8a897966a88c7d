//! Fuzz target: `RigService::feed_byte`
//!
//! Pushes arbitrary link traffic through the whole service on the host
//! hardware stubs.  Every completed line must produce exactly one reply
//! (a sweep produces its own report lines), and actuator outputs must
//! stay inside their clamps.
//!
//! cargo fuzz run fuzz_link_input

#![no_main]

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use motor_rig::adapters::hardware::HardwareAdapter;
use motor_rig::app::events::AppEvent;
use motor_rig::app::ports::EventSink;
use motor_rig::app::service::{Outcome, RigService};
use motor_rig::config::RigConfig;
use motor_rig::drivers::motor::{MAX_INTENSITY, MotorChannel};
use motor_rig::sensors::encoder::PulseCounter;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[derive(Default)]
struct CountingSink(usize);

impl EventSink for CountingSink {
    fn emit(&mut self, event: &AppEvent) {
        assert!(!event.to_line().is_empty());
        self.0 += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let counter = PulseCounter::new();
    let Ok(mut svc) = RigService::new(RigConfig::default()) else {
        return;
    };
    let mut hw = HardwareAdapter::new(&counter);
    let mut sink = CountingSink::default();

    for &b in data {
        let before = sink.0;
        match svc.feed_byte(b, &mut hw, &mut NoDelay, &mut sink) {
            Outcome::Pending => assert_eq!(sink.0, before),
            Outcome::Replied | Outcome::Rejected(_) => assert_eq!(sink.0, before + 1),
            Outcome::Swept(report) => assert_eq!(sink.0, before + report.steps.len() + 2),
        }
        for ch in MotorChannel::ALL {
            assert!(hw.motor(ch).current_intensity() <= MAX_INTENSITY);
        }
    }
});
