//! CSI escape-sequence recognizer
//!
//! Consumes the bytes that follow an ESC, one at a time, and resolves the
//! cursor sequences `ESC [ <letter>`. Anything that stops matching is handed
//! back to the caller so unsupported escape codes degrade to ordinary input
//! instead of vanishing.

/// CSI final byte for the Up arrow.
pub const CSI_UP: u8 = b'A';
/// CSI final byte for the Down arrow.
pub const CSI_DOWN: u8 = b'B';
/// CSI final byte for the Right arrow.
pub const CSI_RIGHT: u8 = b'C';
/// CSI final byte for the Left arrow.
pub const CSI_LEFT: u8 = b'D';

/// Result of feeding one byte to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeOutcome<A> {
    /// Byte absorbed; nothing for the caller to do.
    Consumed,
    /// A bound final letter completed the sequence.
    Action(A),
    /// The sequence stopped matching; these bytes were never consumed and
    /// must be treated as ordinary input.
    PassThrough(Vec<u8>),
}

/// State machine for the bytes following an ESC.
///
/// The owner arms it when it sees ESC and feeds every subsequent byte until
/// the recognizer disarms itself (sequence resolved or abandoned). Arming
/// while already armed restarts the sequence.
pub struct EscapeRecognizer<A> {
    armed: bool,
    pending: Vec<u8>,
    bindings: [Option<A>; 26],
}

impl<A: Copy> EscapeRecognizer<A> {
    pub fn new() -> Self {
        Self {
            armed: false,
            pending: Vec::new(),
            bindings: [None; 26],
        }
    }

    /// Bind an action to an uppercase final letter. Non-letters are ignored.
    pub fn bind(&mut self, letter: u8, action: A) {
        if letter.is_ascii_uppercase() {
            self.bindings[(letter - b'A') as usize] = Some(action);
        }
    }

    /// Start recognizing a new sequence (the ESC byte was just seen).
    pub fn arm(&mut self) {
        self.pending.clear();
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feed the next byte after ESC.
    pub fn feed(&mut self, byte: u8) -> EscapeOutcome<A> {
        if self.pending.is_empty() && byte == b'[' {
            self.pending.push(byte);
            return EscapeOutcome::Consumed;
        }

        if self.pending == [b'['] && byte.is_ascii_uppercase() {
            self.pending.clear();
            self.armed = false;
            return match self.bindings[(byte - b'A') as usize] {
                Some(action) => EscapeOutcome::Action(action),
                // Unbound letters are absorbed without side effect.
                None => EscapeOutcome::Consumed,
            };
        }

        // Not a sequence we know: return everything buffered, plus the byte
        // that broke the match, for ordinary processing.
        self.pending.push(byte);
        self.armed = false;
        EscapeOutcome::PassThrough(std::mem::take(&mut self.pending))
    }
}

impl<A: Copy> Default for EscapeRecognizer<A> {
    fn default() -> Self {
        Self::new()
    }
}
