//! # serial-console
//!
//! Interactive command console for raw, byte-oriented character streams
//! (serial links, sockets, anything that hands over bytes one at a time).
//!
//! ## Architecture
//!
//! One [`LineEditor`] per stream drives everything:
//! - bytes are classified one at a time; escape sequences go through the
//!   [`EscapeRecognizer`], terminators through line-ending auto-detection
//! - submitted lines are resolved by the [`CommandRegistry`] (typed commands
//!   first, then math commands bound to live variables)
//! - every submitted line lands in the [`HistoryBuffer`] for arrow-key recall
//!
//! The crate never blocks and never assumes whole lines arrive atomically:
//! the caller polls whenever bytes may be pending and the editor drains only
//! what is available.

pub mod argument;
pub mod cell;
pub mod editor;
pub mod error;
pub mod escape;
pub mod history;
pub mod operator;
pub mod registry;
pub mod stream;
pub mod token;

pub use argument::{ArgType, Argument};
pub use cell::NumericCell;
pub use editor::{LineEditor, LineEnding, DEFAULT_HISTORY_CAPACITY};
pub use error::ConsoleError;
pub use escape::{EscapeOutcome, EscapeRecognizer};
pub use history::HistoryBuffer;
pub use operator::Operator;
pub use registry::{CommandRegistry, Completion};
pub use stream::{MemoryStream, Stream};
