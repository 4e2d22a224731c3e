//! Argument token parsers
//!
//! Each parser consumes a prefix of the input and reports how many bytes it
//! took, so the registry can walk a type signature across the argument tail.

use crate::argument::ArgType;
use crate::error::ConsoleError;

/// Parse an unsigned integer from the front of `input`.
///
/// Accepts an optional `0b`/`0o`/`0x` base prefix. Overflow is a parse
/// failure, never a silent wraparound. Returns the value and the number of
/// bytes consumed.
pub fn parse_unsigned(input: &str) -> Option<(u64, usize)> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    let base: u64 = if bytes.first() == Some(&b'0') {
        match bytes.get(1) {
            Some(b'b') => {
                pos = 2;
                2
            }
            Some(b'o') => {
                pos = 2;
                8
            }
            Some(b'x') => {
                pos = 2;
                16
            }
            _ => 10,
        }
    } else {
        10
    };

    let start = pos;
    let mut value: u64 = 0;
    while pos < bytes.len() {
        let c = bytes[pos];
        let digit = match c {
            b'0'..=b'9' => (c - b'0') as u64,
            b'a'..=b'f' if base == 16 => (c - b'a' + 10) as u64,
            b'A'..=b'F' if base == 16 => (c - b'A' + 10) as u64,
            _ => break,
        };
        if digit >= base {
            break;
        }
        value = value.checked_mul(base)?.checked_add(digit)?;
        pos += 1;
    }

    // A bare base prefix with no digits is not a number.
    if pos == start {
        return None;
    }
    Some((value, pos))
}

/// Parse a signed integer from the front of `input`.
///
/// Optional leading `+`/`-`, then the same grammar as [`parse_unsigned`].
/// Values outside `i64` range fail.
pub fn parse_signed(input: &str) -> Option<(i64, usize)> {
    let mut pos = 0;
    let mut negative = false;
    match input.as_bytes().first() {
        Some(b'+') => pos = 1,
        Some(b'-') => {
            negative = true;
            pos = 1;
        }
        _ => {}
    }

    let (magnitude, consumed) = parse_unsigned(&input[pos..])?;
    let limit = if negative {
        i64::MAX as u64 + 1
    } else {
        i64::MAX as u64
    };
    if magnitude > limit {
        return None;
    }
    let value = if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    };
    Some((value, pos + consumed))
}

/// Parse the longest valid floating-point lexeme from the front of `input`.
///
/// Grammar: optional sign, digits with an optional fractional part, optional
/// exponent. An exponent marker without digits is left unconsumed, so
/// `3.5e2xyz` yields 350 over five bytes and `3.5ex` yields 3.5 over three.
pub fn parse_double(input: &str) -> Option<(f64, usize)> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos = 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        let mut p = pos + 1;
        while p < bytes.len() && bytes[p].is_ascii_digit() {
            p += 1;
        }
        frac_digits = p - pos - 1;
        if int_digits + frac_digits > 0 {
            pos = p;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut p = pos + 1;
        if matches!(bytes.get(p), Some(b'+') | Some(b'-')) {
            p += 1;
        }
        let exp_start = p;
        while p < bytes.len() && bytes[p].is_ascii_digit() {
            p += 1;
        }
        if p > exp_start {
            pos = p;
        }
    }

    let value = input[..pos].parse::<f64>().ok()?;
    Some((value, pos))
}

/// Parse a string token from the front of `input`.
///
/// A leading double quote reads up to the closing quote (quotes consumed,
/// not included; an unterminated quote takes the remainder). Otherwise the
/// token runs to the next whitespace; an empty bare token is a failure.
pub fn parse_string(input: &str) -> Option<(String, usize)> {
    if let Some(rest) = input.strip_prefix('"') {
        return match rest.find('"') {
            Some(end) => Some((rest[..end].to_string(), end + 2)),
            None => Some((rest.to_string(), input.len())),
        };
    }

    let end = input
        .find(char::is_whitespace)
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((input[..end].to_string(), end))
}

/// Cursor over a command's argument tail.
///
/// Skips separating whitespace before every token and keeps case intact for
/// string tokens.
pub struct TokenCursor<'a> {
    rest: &'a str,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tail: &'a str) -> Self {
        Self { rest: tail }
    }

    /// Whether only whitespace remains.
    pub fn is_exhausted(&self) -> bool {
        self.rest.trim_start().is_empty()
    }

    pub fn double(&mut self) -> Result<f64, ConsoleError> {
        self.skip_space();
        let (value, n) =
            parse_double(self.rest).ok_or(ConsoleError::TypeMismatch(ArgType::Double))?;
        self.rest = &self.rest[n..];
        Ok(value)
    }

    pub fn unsigned(&mut self) -> Result<u64, ConsoleError> {
        self.skip_space();
        let (value, n) =
            parse_unsigned(self.rest).ok_or(ConsoleError::TypeMismatch(ArgType::Unsigned))?;
        self.rest = &self.rest[n..];
        Ok(value)
    }

    pub fn signed(&mut self) -> Result<i64, ConsoleError> {
        self.skip_space();
        let (value, n) =
            parse_signed(self.rest).ok_or(ConsoleError::TypeMismatch(ArgType::Signed))?;
        self.rest = &self.rest[n..];
        Ok(value)
    }

    pub fn text(&mut self) -> Result<String, ConsoleError> {
        self.skip_space();
        let (value, n) =
            parse_string(self.rest).ok_or(ConsoleError::TypeMismatch(ArgType::Text))?;
        self.rest = &self.rest[n..];
        Ok(value)
    }

    fn skip_space(&mut self) {
        self.rest = self.rest.trim_start();
    }
}
