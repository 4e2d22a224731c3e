//! Console error types

use crate::argument::ArgType;

/// Console error with code and message.
///
/// Every error is recovered locally: `process_command` turns it into a
/// response string and a failure flag, never into an aborted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsoleError {
    /// E01: name matches neither command set
    #[error("E01: unknown command")]
    UnknownCommand,
    /// E02: argument token failed to parse as its declared type,
    /// or an `Argument` was read through the wrong tag
    #[error("E02: invalid {0} argument")]
    TypeMismatch(ArgType),
    /// E03: unconsumed tail after the signature was exhausted
    #[error("E03: too many arguments")]
    TooManyArguments,
    /// E04: math verb not recognized
    #[error("E04: unknown operator")]
    UnknownOperator,
    /// E05: type signature contains an invalid code
    #[error("E05: invalid type code '{0}'")]
    RegistrationRejected(char),
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::TypeMismatch(_) => "E02",
            Self::TooManyArguments => "E03",
            Self::UnknownOperator => "E04",
            Self::RegistrationRejected(_) => "E05",
        }
    }
}
