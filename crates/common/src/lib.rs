mod error;

pub use error::{ErrorKind, ParseError};

use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! errinput {
    ($($args:tt)*) => {
        $crate::Error::InvalidInput(format!($($args)*)).into()
    };
}

/// Errors shared across the whereq crates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// A predicate failed to parse. Carries the classified failure so
    /// callers can distinguish categories programmatically rather than
    /// by matching message text.
    Parse(ParseError),
    /// Invalid user input outside the parser, e.g. a bad vocabulary
    /// file or log level.
    InvalidInput(String),
    /// An IO error, e.g. from the line reader.
    IO(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "parse error: {err}"),
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::IO(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<flexi_logger::FlexiLoggerError> for Error {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for Error {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        Error::IO(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IO(err.to_string())
    }
}

/// A whereq Result returning Error.
pub type Result<T> = std::result::Result<T, Error>;

impl<T> From<Error> for Result<T> {
    fn from(error: Error) -> Self {
        Err(error)
    }
}

impl<T> From<ParseError> for Result<T> {
    fn from(error: ParseError) -> Self {
        Err(error.into())
    }
}
