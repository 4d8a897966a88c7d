//! Host link adapter over UART0.
//!
//! Implements [`EventSink`] by writing each [`AppEvent`] as one
//! `\n`-terminated line, and [`LinkPort`] over the receive FIFO.  The
//! same UART carries the log console, so a host reading replies should
//! ignore lines that look like log records.

use log::debug;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, LinkPort};
use crate::drivers::hw_init;

#[derive(Default)]
pub struct SerialLink;

impl SerialLink {
    pub fn new() -> Self {
        Self
    }
}

impl LinkPort for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        hw_init::uart_read(buf)
    }

    fn discard_input(&mut self) {
        hw_init::uart_flush_input();
    }
}

impl EventSink for SerialLink {
    fn emit(&mut self, event: &AppEvent) {
        let line = event.to_line();
        debug!("TX | {line}");
        hw_init::uart_write(line.as_bytes());
        hw_init::uart_write(b"\n");
    }
}
