//! Byte stream collaborator
//!
//! The console makes no transport assumption beyond these four capabilities:
//! report availability, read one byte, write bytes, flush.

use std::collections::VecDeque;

/// Raw byte stream the console is attached to.
///
/// Implemented by the caller for whatever carries the session (UART, socket,
/// pty). The editor only reads while `available` reports pending input, so a
/// conforming implementation never causes the console to block.
pub trait Stream {
    /// Whether at least one byte is pending.
    fn available(&mut self) -> bool;

    /// Read one byte. Returns `None` when nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write raw bytes to the terminal side.
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Flush buffered output.
    fn flush(&mut self);

    /// Write a string slice.
    fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

/// In-memory loopback stream.
///
/// Input is a FIFO fed by the test or host program; output is captured for
/// inspection. This is the fixture the crate's own tests drive the editor
/// with.
#[derive(Debug, Default)]
pub struct MemoryStream {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl MemoryStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes on the input side.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output as text, replacing any non-UTF8 byte.
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Drain captured output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl Stream for MemoryStream {
    fn available(&mut self) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    fn flush(&mut self) {}
}
