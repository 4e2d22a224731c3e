//! Line-editing orchestrator
//!
//! Consumes bytes from the stream one at a time: escape sequences go to the
//! recognizer, terminator bytes drive line-ending auto-detection, everything
//! else edits the buffer in place. Polling does only the work for the bytes
//! currently available and never blocks.

use crate::escape::{EscapeOutcome, EscapeRecognizer, CSI_DOWN, CSI_LEFT, CSI_RIGHT, CSI_UP};
use crate::history::HistoryBuffer;
use crate::registry::CommandRegistry;
use crate::stream::Stream;

const ESC: u8 = 0x1b;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;
const TAB: u8 = b'\t';
const CTRL_C: u8 = 0x03;
const CTRL_U: u8 = 0x15;
const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Blank padding width of the clear-line primitive.
const CLEAR_WIDTH: usize = 80;

/// Recall-history slots per editor.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Line-ending convention of the connected terminal.
///
/// Starts unknown; the first terminator byte observed fixes it for the
/// remainder of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Unknown,
    Lf,
    Cr,
    CrLf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowKey {
    Up,
    Down,
    Right,
    Left,
}

/// One interactive editing session over one stream.
///
/// Owns the command registry, the recall history, the escape recognizer and
/// the edit buffer. Instances share no state; one stream gets one editor.
pub struct LineEditor {
    registry: CommandRegistry,
    history: HistoryBuffer,
    escape: EscapeRecognizer<ArrowKey>,
    line: String,
    cursor: usize,
    ending: LineEnding,
    /// A CR was seen and the next byte decides what it meant.
    pending_cr: bool,
}

impl LineEditor {
    pub fn new(registry: CommandRegistry) -> Self {
        Self::with_history_capacity(registry, DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an editor with a specific history capacity (must be >= 1).
    pub fn with_history_capacity(registry: CommandRegistry, capacity: usize) -> Self {
        let mut escape = EscapeRecognizer::new();
        escape.bind(CSI_UP, ArrowKey::Up);
        escape.bind(CSI_DOWN, ArrowKey::Down);
        escape.bind(CSI_RIGHT, ArrowKey::Right);
        escape.bind(CSI_LEFT, ArrowKey::Left);

        Self {
            registry,
            history: HistoryBuffer::new(capacity, true),
            escape,
            line: String::new(),
            cursor: 0,
            ending: LineEnding::Unknown,
            pending_cr: false,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Current edit buffer contents.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Cursor offset into the edit buffer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal line-ending mode detected so far.
    pub fn line_ending(&self) -> LineEnding {
        self.ending
    }

    /// Per-keystroke entry point: process every byte currently available and
    /// return. Makes no progress and performs no I/O when nothing is pending.
    pub fn poll(&mut self, stream: &mut dyn Stream) {
        let mut did_work = false;
        while stream.available() {
            let Some(byte) = stream.read_byte() else { break };
            self.process_byte(byte, stream);
            did_work = true;
        }
        if did_work {
            stream.flush();
        }
    }

    /// Process a single input byte.
    pub fn process_byte(&mut self, byte: u8, out: &mut dyn Stream) {
        // ESC restarts the recognizer even mid-sequence.
        if byte == ESC {
            self.escape.arm();
            return;
        }

        if self.escape.is_armed() {
            match self.escape.feed(byte) {
                EscapeOutcome::Consumed => {}
                EscapeOutcome::Action(key) => self.handle_arrow(key, out),
                EscapeOutcome::PassThrough(bytes) => {
                    for b in bytes {
                        self.handle_input(b, out);
                    }
                }
            }
            return;
        }

        self.handle_input(byte, out);
    }

    fn handle_input(&mut self, byte: u8, out: &mut dyn Stream) {
        if self.pending_cr {
            self.pending_cr = false;
            match self.ending {
                LineEnding::Unknown => {
                    if byte == LF {
                        self.ending = LineEnding::CrLf;
                        log::debug!("line ending fixed: CRLF");
                        self.submit(out);
                    } else {
                        self.ending = LineEnding::Cr;
                        log::debug!("line ending fixed: CR");
                        self.submit(out);
                        self.handle_input(byte, out);
                    }
                }
                LineEnding::CrLf => {
                    if byte == LF {
                        self.submit(out);
                    } else {
                        // Lone CR is not a terminator in CRLF mode.
                        self.handle_input(byte, out);
                    }
                }
                // Fixed single-byte modes never set pending_cr.
                LineEnding::Lf | LineEnding::Cr => {}
            }
            return;
        }

        match byte {
            CR => match self.ending {
                LineEnding::Unknown | LineEnding::CrLf => self.pending_cr = true,
                LineEnding::Cr => self.submit(out),
                LineEnding::Lf => {}
            },

            LF => match self.ending {
                LineEnding::Unknown => {
                    self.ending = LineEnding::Lf;
                    log::debug!("line ending fixed: LF");
                    self.submit(out);
                }
                LineEnding::Lf => self.submit(out),
                LineEnding::Cr | LineEnding::CrLf => {}
            },

            BACKSPACE | DELETE => {
                if self.cursor > 0 {
                    self.line.remove(self.cursor - 1);
                    self.cursor -= 1;
                    self.redraw(out);
                }
            }

            TAB => self.handle_tab(out),

            CTRL_C => {
                out.write_str("^C");
                out.write_str(self.newline());
                self.line.clear();
                self.cursor = 0;
            }

            CTRL_U => {
                self.clear_line(out);
                self.line.clear();
                self.cursor = 0;
            }

            // Printable input inserts at the cursor.
            0x20..=0x7e => {
                if self.cursor == self.line.len() {
                    self.line.push(byte as char);
                    self.cursor += 1;
                    out.write_bytes(&[byte]);
                } else {
                    self.line.insert(self.cursor, byte as char);
                    self.cursor += 1;
                    self.redraw(out);
                }
            }

            _ => {}
        }
    }

    fn handle_arrow(&mut self, key: ArrowKey, out: &mut dyn Stream) {
        match key {
            ArrowKey::Up => {
                let text = self.history.recall_prev().to_string();
                self.replace_line(&text, out);
            }
            ArrowKey::Down => {
                let text = self.history.recall_next().to_string();
                self.replace_line(&text, out);
            }
            ArrowKey::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    out.write_bytes(&[BACKSPACE]);
                }
            }
            ArrowKey::Right => {
                if self.cursor < self.line.len() {
                    // Re-emit the character under the cursor to advance.
                    let b = self.line.as_bytes()[self.cursor];
                    out.write_bytes(&[b]);
                    self.cursor += 1;
                }
            }
        }
    }

    fn handle_tab(&mut self, out: &mut dyn Stream) {
        let matches = self.registry.tab_complete(&self.line);
        match matches.len() {
            0 => {}
            1 => {
                self.line = matches[0].text.clone();
                self.cursor = self.line.len();
                self.redraw(out);
            }
            _ => {
                out.write_str(self.newline());
                for m in &matches {
                    out.write_str(&format!("  {:<14} {}", m.text, m.description));
                    out.write_str(self.newline());
                }
                self.line = common_prefix(&matches);
                self.cursor = self.line.len();
                self.redraw(out);
            }
        }
    }

    fn submit(&mut self, out: &mut dyn Stream) {
        let newline = self.newline();
        out.write_str(newline);

        let line = std::mem::take(&mut self.line);
        self.cursor = 0;
        if line.is_empty() {
            return;
        }

        let (response, ok) = self.registry.process_command(&line, out);
        log::trace!("submitted {:?}, ok={}", line, ok);
        self.history.push(&line);

        if !response.is_empty() {
            out.write_str(&response);
            out.write_str(newline);
        }
    }

    /// Replace the whole edit buffer, cursor at the end of the new text.
    fn replace_line(&mut self, text: &str, out: &mut dyn Stream) {
        self.clear_line(out);
        self.line = text.to_string();
        self.cursor = self.line.len();
        out.write_str(&self.line);
    }

    /// Repaint the line from scratch and walk the terminal cursor back to the
    /// logical cursor position.
    fn redraw(&mut self, out: &mut dyn Stream) {
        self.clear_line(out);
        out.write_str(&self.line);
        for _ in 0..self.line.len() - self.cursor {
            out.write_bytes(&[BACKSPACE]);
        }
    }

    /// Column start, blank padding, column start. Run before any full-line
    /// repaint so no stale trailing characters survive.
    fn clear_line(&self, out: &mut dyn Stream) {
        out.write_bytes(b"\r");
        out.write_bytes(&[b' '; CLEAR_WIDTH]);
        out.write_bytes(b"\r");
    }

    fn newline(&self) -> &'static str {
        match self.ending {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf | LineEnding::Unknown => "\r\n",
        }
    }
}

/// Longest common prefix of all candidate texts.
fn common_prefix(candidates: &[crate::registry::Completion]) -> String {
    let mut prefix = candidates[0].text.clone();
    for c in &candidates[1..] {
        let common = prefix
            .chars()
            .zip(c.text.chars())
            .take_while(|(a, b)| a == b)
            .count();
        prefix.truncate(common);
    }
    prefix
}
