//! Fuzz target: `LineAssembler::push`
//!
//! Drives arbitrary byte sequences into the line assembler and asserts
//! that it never panics, never yields a line longer than its buffer, and
//! never yields a terminator or non-ASCII byte inside a line.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use motor_rig::protocol::line::{LINE_CAPACITY, LineAssembler, LineEvent};

fuzz_target!(|data: &[u8]| {
    let mut asm: LineAssembler = LineAssembler::new();

    for &b in data {
        match asm.push(b) {
            Some(LineEvent::Line(line)) => {
                assert!(line.len() <= LINE_CAPACITY, "line exceeds buffer");
                assert!(line.is_ascii());
                assert!(!line.contains(['\r', '\n']));
            }
            Some(LineEvent::Overflow { dropped }) => assert!(dropped > 0),
            Some(LineEvent::NotAscii) | None => {}
        }
    }

    // After a reset the assembler must accept bytes cleanly again.
    asm.reset();
    assert_eq!(asm.pending(), 0);
    for &b in data {
        let _ = asm.push(b);
    }
});
