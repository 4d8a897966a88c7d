//! Fuzz target: `parse_line`
//!
//! Any UTF-8 input either parses or yields a `ParseError`; a parsed
//! command must survive re-parsing of its canonical form.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use motor_rig::app::commands::AppCommand;
use motor_rig::protocol::command::parse_line;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(AppCommand::Drive(req)) = parse_line(line) {
        let canonical = format!("MA:{},MB:{},S:{}", req.motor_a, req.motor_b, req.servo);
        assert_eq!(parse_line(&canonical), Ok(AppCommand::Drive(req)));
    }
});
