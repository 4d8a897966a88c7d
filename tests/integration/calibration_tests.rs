//! Integration tests for the calibration sweep.
//!
//! The [`EdgeDelay`] mock delivers a known number of encoder edges
//! during every dwell and a few stray edges during every settle pause,
//! so each step's report can be checked edge for edge.

use motor_rig::adapters::delay::WatchdogDelay;
use motor_rig::app::calibration::run_sweep;
use motor_rig::app::commands::Trigger;
use motor_rig::app::events::AppEvent;
use motor_rig::config::{RigConfig, SweepPlan};
use motor_rig::drivers::motor::MotorChannel;
use motor_rig::drivers::watchdog::Watchdog;
use motor_rig::sensors::encoder::PulseCounter;

use crate::mock_hw::{EdgeDelay, MockRig, RecordingDelay, RecordingSink, RigCall};

fn default_plan() -> SweepPlan {
    RigConfig::default().sweep
}

#[test]
fn visits_the_full_grid_in_order() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = EdgeDelay::new(&counter, 2_000);
    let mut sink = RecordingSink::new();

    let report = run_sweep(&default_plan(), true, false, Trigger::Switch, &mut hw, &mut delay, &mut sink);

    let grid: Vec<u8> = report.steps.iter().map(|s| s.intensity).collect();
    assert_eq!(grid, vec![50, 75, 100, 125, 150]);
    assert_eq!(delay.waits_ms, [2_000u32, 500].repeat(5));
}

#[test]
fn each_step_counts_only_its_own_dwell() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = EdgeDelay::new(&counter, 2_000);
    let mut sink = RecordingSink::new();

    // Leftover edges from before the sweep must not leak into step 1.
    for _ in 0..99 {
        counter.on_edge(MotorChannel::A);
    }

    let report = run_sweep(&default_plan(), true, false, Trigger::Link, &mut hw, &mut delay, &mut sink);

    for (i, step) in report.steps.iter().enumerate() {
        assert_eq!(step.counts, delay.expected(i as u32 + 1), "step {i}");
    }
    assert_eq!(report.final_counts, delay.expected(5));
}

#[test]
fn servo_advances_monotonically_and_returns_to_neutral() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::new();

    let plan = SweepPlan {
        servo_step_deg: 30,
        ..default_plan()
    };
    let report = run_sweep(&plan, true, false, Trigger::Link, &mut hw, &mut delay, &mut sink);

    let per_step: Vec<u8> = report.steps.iter().map(|s| s.servo).collect();
    assert_eq!(per_step, vec![70, 100, 130, 140, 140]);
    assert!(per_step.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(hw.servo_history(), vec![40, 70, 100, 130, 140, 140, 90]);
}

#[test]
fn default_plan_reaches_the_servo_limit_on_the_last_step() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::new();

    let report = run_sweep(&default_plan(), true, false, Trigger::Link, &mut hw, &mut delay, &mut sink);

    let per_step: Vec<u8> = report.steps.iter().map(|s| s.servo).collect();
    assert_eq!(per_step, vec![60, 80, 100, 120, 140]);
}

#[test]
fn motors_run_at_raw_intensity_and_stop_after_each_dwell() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::new();

    run_sweep(&default_plan(), true, false, Trigger::Link, &mut hw, &mut delay, &mut sink);

    // Per step: reset, drive A, drive B, stop A, stop B, servo.
    let first: Vec<RigCall> = hw.calls[1..7].to_vec();
    assert_eq!(
        first,
        vec![
            RigCall::ResetCounts,
            RigCall::Drive {
                channel: MotorChannel::A,
                intensity: 50,
                invert: true
            },
            RigCall::Drive {
                channel: MotorChannel::B,
                intensity: 50,
                invert: false
            },
            RigCall::Stop(MotorChannel::A),
            RigCall::Stop(MotorChannel::B),
            RigCall::Servo(60),
        ]
    );

    for call in hw.drives() {
        let RigCall::Drive {
            channel, intensity, ..
        } = call
        else {
            unreachable!()
        };
        assert!([50, 75, 100, 125, 150].contains(&intensity), "{channel:?} at {intensity}");
    }
    assert_eq!(hw.intensity(MotorChannel::A), 0);
    assert_eq!(hw.intensity(MotorChannel::B), 0);
}

#[test]
fn reports_every_step_on_the_wire() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut delay = EdgeDelay::new(&counter, 2_000);
    let mut sink = RecordingSink::new();

    run_sweep(&default_plan(), true, false, Trigger::Switch, &mut hw, &mut delay, &mut sink);

    assert_eq!(
        sink.lines,
        vec![
            "CAL:START:SWITCH",
            "CAL:STEP:PWM:50,A:10,B:20,S:60",
            "CAL:STEP:PWM:75,A:20,B:40,S:80",
            "CAL:STEP:PWM:100,A:30,B:60,S:100",
            "CAL:STEP:PWM:125,A:40,B:80,S:120",
            "CAL:STEP:PWM:150,A:50,B:100,S:140",
            "CAL:DONE:A:50,B:100",
        ]
    );
    assert!(matches!(sink.events.last(), Some(AppEvent::CalibrationFinished(_))));
}

#[test]
fn watchdog_is_fed_through_long_waits() {
    let counter = PulseCounter::new();
    let mut hw = MockRig::new(&counter);
    let mut sink = RecordingSink::new();
    let watchdog = Watchdog::new();
    let mut delay = WatchdogDelay::new(RecordingDelay::default(), &watchdog);

    run_sweep(&default_plan(), true, false, Trigger::Link, &mut hw, &mut delay, &mut sink);

    // 2000 ms dwell = two 1 s slices, 500 ms settle = one.
    assert_eq!(delay.inner().waits_ms, [1_000u32, 1_000, 500].repeat(5));
    assert_eq!(watchdog.feeds(), 15);
}
