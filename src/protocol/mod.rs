//! Host link protocol: newline framing and the command grammar.
//!
//! Bytes from the UART go through [`line::LineAssembler`]; each complete
//! line is handed to [`command::parse_line`].  Replies are rendered by
//! [`AppEvent`](crate::app::events::AppEvent).

pub mod command;
pub mod line;

pub use command::{ParseError, parse_line};
pub use line::{LINE_CAPACITY, LineAssembler, LineEvent};
