//! Main-loop passes over a mock host link.
//!
//! A sweep blocks the loop for seconds; whatever the host sends in that
//! window must be thrown away, not replayed once the sweep returns.

use motor_rig::app::commands::Trigger;
use motor_rig::app::events::AppEvent;
use motor_rig::app::service::{Outcome, RX_CHUNK, RigService};
use motor_rig::config::RigConfig;
use motor_rig::drivers::switch::Edge;
use motor_rig::protocol::command::ParseError;
use motor_rig::sensors::encoder::PulseCounter;

use crate::mock_hw::{MockLink, MockRig, QueueingDelay, RecordingDelay};

fn make_rig(counter: &PulseCounter) -> (RigService, MockRig<'_>, MockLink) {
    let mut svc = RigService::new(RigConfig::default()).unwrap();
    let mut hw = MockRig::new(counter);
    let mut link = MockLink::new();
    svc.start(&mut hw, &mut link);
    hw.calls.clear();
    link.sink.lines.clear();
    link.sink.events.clear();
    (svc, hw, link)
}

fn sweep_starts(link: &MockLink) -> usize {
    link.sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::CalibrationStarted(_)))
        .count()
}

fn applied(link: &MockLink) -> usize {
    link.sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Applied { .. }))
        .count()
}

#[test]
fn start_sent_during_switch_sweep_is_discarded() {
    let counter = PulseCounter::new();
    let (mut svc, mut hw, mut link) = make_rig(&counter);
    let mut delay = QueueingDelay::new(&link, "START\nMA:100,MB:100,S:90\n");

    let out = svc.poll_once(Some(Edge::Falling), &mut link, &mut hw, &mut delay);
    assert!(matches!(out, Outcome::Swept(ref r) if r.trigger == Trigger::Switch));
    assert_eq!(link.queued(), 0);
    assert_eq!(link.discards, 1);

    // Next pass finds nothing left to run.
    let out = svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert_eq!(out, Outcome::Pending);

    assert_eq!(svc.sweeps(), 1);
    assert_eq!(sweep_starts(&link), 1);
    assert_eq!(link.sink.lines.first().map(String::as_str), Some("CAL:START:SWITCH"));
    assert_eq!(applied(&link), 0);
}

#[test]
fn link_start_drops_rest_of_chunk_and_queued_input() {
    let counter = PulseCounter::new();
    let (mut svc, mut hw, mut link) = make_rig(&counter);
    let mut delay = QueueingDelay::new(&link, "START\n");
    link.queue("START\nENC:READ\nMA:50,MB:50,S:10\n");

    let out = svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert!(matches!(out, Outcome::Swept(ref r) if r.trigger == Trigger::Link));
    assert_eq!(link.queued(), 0);

    let out = svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert_eq!(out, Outcome::Pending);

    assert_eq!(svc.sweeps(), 1);
    assert_eq!(sweep_starts(&link), 1);
    assert_eq!(applied(&link), 0);
    assert!(
        !link.sink.events.iter().any(|e| matches!(e, AppEvent::EncoderCounts(_))),
        "ENC:READ from before the sweep was answered"
    );
}

#[test]
fn input_after_sweep_is_handled_normally() {
    let counter = PulseCounter::new();
    let (mut svc, mut hw, mut link) = make_rig(&counter);
    let mut delay = RecordingDelay::default();

    svc.poll_once(Some(Edge::Falling), &mut link, &mut hw, &mut delay);
    link.sink.events.clear();

    link.queue("ENC:READ\n");
    let out = svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert_eq!(out, Outcome::Replied);
    assert!(matches!(link.sink.events.as_slice(), [AppEvent::EncoderCounts(_)]));
    assert_eq!(link.discards, 1);
}

#[test]
fn pass_without_sweep_keeps_input_and_reports_last_outcome() {
    let counter = PulseCounter::new();
    let (mut svc, mut hw, mut link) = make_rig(&counter);
    let mut delay = RecordingDelay::default();

    link.queue("ENC:RESET\nHELLO\nENC:RE");
    let out = svc.poll_once(Some(Edge::Rising), &mut link, &mut hw, &mut delay);
    assert_eq!(out, Outcome::Rejected(ParseError::UnknownKeyword));
    assert_eq!(link.discards, 0);
    assert_eq!(svc.pending_input(), "ENC:RE".len());

    link.queue("AD\n");
    let out = svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert_eq!(out, Outcome::Replied);
}

#[test]
fn one_pass_reads_at_most_one_chunk() {
    let counter = PulseCounter::new();
    let (mut svc, mut hw, mut link) = make_rig(&counter);
    let mut delay = RecordingDelay::default();

    let burst = "ENC:READ\n".repeat(RX_CHUNK / 9 + 2);
    link.queue(&burst);
    svc.poll_once(None, &mut link, &mut hw, &mut delay);
    assert_eq!(link.queued(), burst.len() - RX_CHUNK);
    assert_eq!(link.sink.events.len(), RX_CHUNK / 9);
}
