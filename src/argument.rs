//! Typed command arguments

use crate::error::ConsoleError;

/// Argument type code, one per character of a command's type signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// `d` - floating point
    Double,
    /// `u` - unsigned integer
    Unsigned,
    /// `i` - signed integer
    Signed,
    /// `s` - text, bare or double-quoted
    Text,
    /// `o` - marker: everything after this position is optional
    Optional,
}

impl ArgType {
    /// Decode a signature character.
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Double),
            'u' => Some(Self::Unsigned),
            'i' => Some(Self::Signed),
            's' => Some(Self::Text),
            'o' => Some(Self::Optional),
            _ => None,
        }
    }

    /// Signature character for this type.
    pub fn code(self) -> char {
        match self {
            Self::Double => 'd',
            Self::Unsigned => 'u',
            Self::Signed => 'i',
            Self::Text => 's',
            Self::Optional => 'o',
        }
    }
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Double => "double",
            Self::Unsigned => "unsigned integer",
            Self::Signed => "integer",
            Self::Text => "string",
            Self::Optional => "optional",
        })
    }
}

/// A resolved command argument.
///
/// Exactly one of four payload kinds, or `Absent` for an omitted optional
/// trailing argument. Reading through the wrong tag fails with
/// [`ConsoleError::TypeMismatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Floating-point value (`d`).
    Double(f64),
    /// Unsigned integer value (`u`).
    Unsigned(u64),
    /// Signed integer value (`i`).
    Signed(i64),
    /// Text value (`s`).
    Text(String),
    /// Optional trailing argument that was not supplied.
    Absent,
}

impl Argument {
    /// Whether a value was supplied.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Read as floating point.
    pub fn as_double(&self) -> Result<f64, ConsoleError> {
        match self {
            Self::Double(v) => Ok(*v),
            _ => Err(ConsoleError::TypeMismatch(ArgType::Double)),
        }
    }

    /// Read as unsigned integer.
    pub fn as_unsigned(&self) -> Result<u64, ConsoleError> {
        match self {
            Self::Unsigned(v) => Ok(*v),
            _ => Err(ConsoleError::TypeMismatch(ArgType::Unsigned)),
        }
    }

    /// Read as signed integer.
    pub fn as_signed(&self) -> Result<i64, ConsoleError> {
        match self {
            Self::Signed(v) => Ok(*v),
            _ => Err(ConsoleError::TypeMismatch(ArgType::Signed)),
        }
    }

    /// Read as text.
    pub fn as_text(&self) -> Result<&str, ConsoleError> {
        match self {
            Self::Text(v) => Ok(v),
            _ => Err(ConsoleError::TypeMismatch(ArgType::Text)),
        }
    }

    /// Read as floating point, with a default for an absent argument.
    pub fn as_double_or(&self, default: f64) -> Result<f64, ConsoleError> {
        match self {
            Self::Absent => Ok(default),
            _ => self.as_double(),
        }
    }

    /// Read as unsigned integer, with a default for an absent argument.
    pub fn as_unsigned_or(&self, default: u64) -> Result<u64, ConsoleError> {
        match self {
            Self::Absent => Ok(default),
            _ => self.as_unsigned(),
        }
    }

    /// Read as signed integer, with a default for an absent argument.
    pub fn as_signed_or(&self, default: i64) -> Result<i64, ConsoleError> {
        match self {
            Self::Absent => Ok(default),
            _ => self.as_signed(),
        }
    }

    /// Read as text, with a default for an absent argument.
    pub fn as_text_or<'a>(&'a self, default: &'a str) -> Result<&'a str, ConsoleError> {
        match self {
            Self::Absent => Ok(default),
            _ => self.as_text(),
        }
    }
}
