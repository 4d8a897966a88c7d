//! Command grammar.
//!
//! ```text
//! line     = keyword | fields
//! keyword  = "ENC:RESET" | "ENC:READ" | "START"          (case-insensitive)
//! fields   = field *( "," field )
//! field    = key ":" value                               (whitespace-trimmed)
//! key      = "MA" | "MB" | "S"                           (case-insensitive)
//! ```
//!
//! Fields may come in any order; each key must appear exactly once.
//! Values are read like C `atol`: optional sign, leading digits, anything
//! after is ignored, no digits reads as 0, out-of-range saturates.

use core::fmt;

use crate::app::commands::{AppCommand, DriveRequest, Trigger};

/// Keys of the drive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MotorA,
    MotorB,
    Servo,
}

impl Key {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("MA") {
            Some(Self::MotorA)
        } else if raw.eq_ignore_ascii_case("MB") {
            Some(Self::MotorB)
        } else if raw.eq_ignore_ascii_case("S") {
            Some(Self::Servo)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MotorA => "MA",
            Self::MotorB => "MB",
            Self::Servo => "S",
        }
    }
}

/// Why a line was rejected.  Every variant is answered with `ERR:UNKNOWN_CMD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Blank line.
    Empty,
    /// A single word that is neither a keyword nor a drive field.
    UnknownKeyword,
    /// A field has no `:` separator or is empty.
    MalformedField,
    /// A field key is not one of `MA`, `MB`, `S`.
    UnknownField,
    DuplicateField(Key),
    MissingField(Key),
    /// The line outgrew the receive buffer.
    LineTooLong,
    /// The line contained non-ASCII bytes.
    NotAscii,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::UnknownKeyword => write!(f, "unknown keyword"),
            Self::MalformedField => write!(f, "malformed field"),
            Self::UnknownField => write!(f, "unknown field"),
            Self::DuplicateField(k) => write!(f, "duplicate field {}", k.as_str()),
            Self::MissingField(k) => write!(f, "missing field {}", k.as_str()),
            Self::LineTooLong => write!(f, "line too long"),
            Self::NotAscii => write!(f, "non-ASCII input"),
        }
    }
}

/// One `KEY:VALUE` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub key: Key,
    pub value: &'a str,
}

/// Splits a line into fields.
pub struct Tokenizer<'a> {
    parts: core::str::Split<'a, char>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { parts: line.split(',') }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Field<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.parts.next()?.trim();
        let Some((key, value)) = part.split_once(':') else {
            return Some(Err(ParseError::MalformedField));
        };
        Some(match Key::parse(key.trim()) {
            Some(key) => Ok(Field { key, value: value.trim() }),
            None => Err(ParseError::UnknownField),
        })
    }
}

/// Parse a numeric field: optional sign and leading digits, else 0.
pub fn parse_int(raw: &str) -> i32 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse one line (terminator already stripped) into a command.
pub fn parse_line(line: &str) -> Result<AppCommand, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }
    if line.eq_ignore_ascii_case("ENC:RESET") {
        return Ok(AppCommand::ResetEncoders);
    }
    if line.eq_ignore_ascii_case("ENC:READ") {
        return Ok(AppCommand::ReadEncoders);
    }
    if line.eq_ignore_ascii_case("START") {
        return Ok(AppCommand::StartCalibration(Trigger::Link));
    }
    parse_drive(line).map(AppCommand::Drive).map_err(|e| match e {
        ParseError::MalformedField | ParseError::UnknownField if !line.contains(',') => {
            ParseError::UnknownKeyword
        }
        e => e,
    })
}

fn parse_drive(line: &str) -> Result<DriveRequest, ParseError> {
    let (mut motor_a, mut motor_b, mut servo) = (None, None, None);

    for field in Tokenizer::new(line) {
        let field = field?;
        let slot = match field.key {
            Key::MotorA => &mut motor_a,
            Key::MotorB => &mut motor_b,
            Key::Servo => &mut servo,
        };
        if slot.is_some() {
            return Err(ParseError::DuplicateField(field.key));
        }
        *slot = Some(parse_int(field.value));
    }

    Ok(DriveRequest {
        motor_a: motor_a.ok_or(ParseError::MissingField(Key::MotorA))?,
        motor_b: motor_b.ok_or(ParseError::MissingField(Key::MotorB))?,
        servo: servo.ok_or(ParseError::MissingField(Key::Servo))?,
    })
}
