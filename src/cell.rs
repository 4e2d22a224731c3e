//! Numeric storage capability for math commands

use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

/// Get/set access to a numeric variable a math command does not own.
///
/// The capability guarantees atomicity per individual `get` or `set` only.
/// The read-modify-write sequence of an arithmetic verb is not atomic: when
/// the underlying variable is shared with a concurrently running writer, that
/// writer can be overwritten between the read and the write. Callers sharing
/// a cell across true concurrent contexts own that trade-off.
pub trait NumericCell {
    /// Current value.
    fn get(&self) -> f64;

    /// Replace the value.
    fn set(&self, value: f64);
}

impl NumericCell for Rc<Cell<f64>> {
    fn get(&self) -> f64 {
        Cell::get(self)
    }

    fn set(&self, value: f64) {
        Cell::set(self, value);
    }
}

impl NumericCell for Arc<Mutex<f64>> {
    fn get(&self) -> f64 {
        *self.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, value: f64) {
        *self.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }
}
