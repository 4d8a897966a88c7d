//! Newline framing for the host link.
//!
//! Wire format: ASCII text, one command per line, `\n` terminates,
//! `\r` is dropped wherever it appears.
//!
//! The assembler accumulates bytes into a fixed buffer and yields a
//! complete line on each terminator.  A partial line simply waits for
//! more bytes, however long that takes.  A line that outgrows the buffer
//! is discarded up to its terminator and reported as
//! [`LineEvent::Overflow`]; a line containing non-ASCII bytes is
//! reported as [`LineEvent::NotAscii`].

/// Buffer capacity.  The longest well-formed command
/// (`MA:-2147483648,MB:-2147483648,S:-2147483648`) is 43 bytes.
pub const LINE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// A complete line, terminator stripped.
    Line(&'a str),
    /// The line exceeded the buffer; `dropped` bytes were discarded.
    Overflow { dropped: usize },
    /// The line contained bytes outside 7-bit ASCII.
    NotAscii,
}

/// Streaming line assembler.
pub struct LineAssembler<const N: usize = LINE_CAPACITY> {
    buf: heapless::Vec<u8, N>,
    dropped: usize,
    not_ascii: bool,
    /// A line was handed out; clear the buffer before the next byte.
    consumed: bool,
}

impl<const N: usize> LineAssembler<N> {
    pub fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            dropped: 0,
            not_ascii: false,
            consumed: false,
        }
    }

    /// Feed one byte.
    ///
    /// Returns `Some` when a terminator completes a line.  The returned
    /// slice is valid until the next call to `push`.
    pub fn push(&mut self, byte: u8) -> Option<LineEvent<'_>> {
        if self.consumed {
            self.reset();
        }

        match byte {
            b'\r' => None,
            b'\n' => {
                self.consumed = true;
                if self.dropped > 0 {
                    return Some(LineEvent::Overflow { dropped: self.dropped });
                }
                if self.not_ascii {
                    return Some(LineEvent::NotAscii);
                }
                // Every stored byte is ASCII, so this cannot fail.
                core::str::from_utf8(&self.buf).ok().map(LineEvent::Line)
            }
            _ => {
                if !byte.is_ascii() {
                    self.not_ascii = true;
                }
                if self.dropped > 0 || self.buf.push(byte).is_err() {
                    self.dropped += 1;
                }
                None
            }
        }
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        if self.consumed { 0 } else { self.buf.len() + self.dropped }
    }

    /// Discard the line in progress.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.dropped = 0;
        self.not_ascii = false;
        self.consumed = false;
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}
