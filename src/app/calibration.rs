//! Calibration sweep.
//!
//! Runs both motors across the intensity grid of a [`SweepPlan`] and
//! records how many encoder edges each produced per dwell.  The ratio of
//! the two counts is what `counts_per_rev_a / counts_per_rev_b` in
//! [`RigConfig`](crate::config::RigConfig) is derived from, so the sweep
//! drives both channels at the raw grid intensity.
//!
//! The sweep blocks the caller for the whole sequence
//! (≈ 5 × 2.5 s with the default plan).  Nothing else is serviced
//! until it returns.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::{MAX_SWEEP_STEPS, SweepPlan};
use crate::drivers::motor::MotorChannel;
use crate::sensors::encoder::EncoderSnapshot;

use super::commands::Trigger;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EncoderPort, EventSink};

/// Result of one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepStep {
    /// Intensity both motors ran at.
    pub intensity: u8,
    /// Edges counted during this step's dwell only.
    pub counts: EncoderSnapshot,
    /// Servo angle after advancing for this step.
    pub servo: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub trigger: Trigger,
    pub steps: heapless::Vec<SweepStep, MAX_SWEEP_STEPS>,
    /// Counts of the last step (zero if the grid was empty).
    pub final_counts: EncoderSnapshot,
}

/// Run the full sweep.
///
/// Motor A is driven with `invert_a`, motor B with `invert_b`; both at
/// the plan's grid intensity.  Each step is emitted as soon as it is
/// measured, the settle pause follows.
pub fn run_sweep<H, D, S>(
    plan: &SweepPlan,
    invert_a: bool,
    invert_b: bool,
    trigger: Trigger,
    hw: &mut H,
    delay: &mut D,
    sink: &mut S,
) -> SweepReport
where
    H: ActuatorPort + EncoderPort,
    D: DelayNs,
    S: EventSink,
{
    info!("Calibration: start ({trigger}), {} steps", plan.step_count());
    sink.emit(&AppEvent::CalibrationStarted(trigger));

    let mut servo = hw.set_servo(i32::from(plan.servo_min_deg));
    let mut report = SweepReport {
        trigger,
        steps: heapless::Vec::new(),
        final_counts: EncoderSnapshot::default(),
    };

    for intensity in plan.intensities() {
        hw.reset_counts();
        hw.drive_motor(MotorChannel::A, i32::from(intensity), invert_a);
        hw.drive_motor(MotorChannel::B, i32::from(intensity), invert_b);
        delay.delay_ms(plan.dwell_ms);
        hw.all_off();

        let counts = hw.counts();
        servo = hw.set_servo(i32::from(plan.next_servo(servo)));

        let step = SweepStep {
            intensity,
            counts,
            servo,
        };
        info!(
            "Calibration: pwm={} A={} B={} servo={}",
            intensity, counts.a, counts.b, servo
        );
        sink.emit(&AppEvent::CalibrationStep(step));
        // Capacity is checked by RigConfig::validate.
        let _ = report.steps.push(step);
        report.final_counts = counts;

        delay.delay_ms(plan.settle_ms);
    }

    hw.set_servo(i32::from(plan.servo_neutral_deg));
    info!(
        "Calibration: done, final A={} B={}",
        report.final_counts.a, report.final_counts.b
    );
    sink.emit(&AppEvent::CalibrationFinished(report.final_counts));
    report
}
