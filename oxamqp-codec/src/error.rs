//! Custom error

use std::fmt::Display;

use serde::{de, ser};

/// Errors raised while constructing, encoding or decoding AMQP values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Custom error message
    #[error("{0}")]
    Message(String),

    /// A native value does not fit the declared primitive kind or width
    #[error("Expecting {expected}, found {found}")]
    Validation {
        /// The kind (and range) that was expected
        expected: String,

        /// What was found instead
        found: String,
    },

    /// Incompatible or excess arguments
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// Access to an index that has not been set
    #[error("Index {index} does not exist (length is {len})")]
    Index {
        /// The requested index
        index: usize,

        /// The length of the container
        len: usize,
    },

    /// The operation is deliberately not supported
    #[error("Operation not supported: {0}")]
    OperationNotSupported(&'static str),

    /// Invalid format code
    #[error("Invalid format code 0x{0:02x}")]
    InvalidFormatCode(u8),

    /// The buffer ended before the value was complete
    #[error("Unexpected end of buffer")]
    UnexpectedEof,

    /// Invalid value
    #[error("Invalid value")]
    InvalidValue,

    /// A described type is found while a primitive type is expected
    #[error("Expecting non-described constructor")]
    IsDescribedType,

    /// Found invalid UTF-8 encoding
    #[error("Invalid UTF-8 encoding")]
    InvalidUtf8Encoding,

    /// Length is invalid
    #[error("Invalid length")]
    InvalidLength,

    /// The encoded value would exceed the largest width of its format code
    #[error("Too long")]
    TooLong,
}

impl Error {
    pub(crate) fn validation(expected: impl Display, found: impl Display) -> Self {
        Self::Validation {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn argument(msg: impl Display) -> Self {
        Self::Argument(msg.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8Encoding
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}
