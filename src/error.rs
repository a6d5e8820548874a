//! Error types for parsing and serialization.
//!
//! Every failure is one of three kinds: malformed input (`Parsing`), a
//! violated builder invariant (`Internal`), or an environment/configuration
//! problem unrelated to document content (`Operation`). Parsing errors always
//! carry the 1-based source line and, where it can be pinned down, the
//! 1-based column.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input text.
    Parsing,
    /// A structural invariant the tree builder relies on was violated;
    /// an earlier pass should have prevented it.
    Internal,
    /// Environment or configuration failure (unopenable file, bad
    /// serializer settings).
    Operation,
}

/// Errors produced by parsing and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input at a known source location.
    Parsing {
        message: String,
        line: usize,
        column: Option<usize>,
    },
    /// Violated structural invariant, surfaced rather than swallowed.
    Internal { message: String },
    /// Environment or configuration failure.
    Operation { message: String },
}

impl Error {
    pub(crate) fn parsing(message: impl Into<String>, line: usize) -> Self {
        Error::Parsing {
            message: message.into(),
            line,
            column: None,
        }
    }

    pub(crate) fn parsing_at(message: impl Into<String>, line: usize, column: usize) -> Self {
        Error::Parsing {
            message: message.into(),
            line,
            column: Some(column),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    pub(crate) fn operation(message: impl Into<String>) -> Self {
        Error::Operation {
            message: message.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parsing { .. } => ErrorKind::Parsing,
            Error::Internal { .. } => ErrorKind::Internal,
            Error::Operation { .. } => ErrorKind::Operation,
        }
    }

    /// The diagnostic message, without location information.
    pub fn message(&self) -> &str {
        match self {
            Error::Parsing { message, .. }
            | Error::Internal { message }
            | Error::Operation { message } => message,
        }
    }

    /// The 1-based source line, for parsing errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parsing { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The 1-based source column, where one could be determined.
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Parsing { column, .. } => *column,
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parsing {
                message,
                line,
                column: Some(column),
            } => {
                write!(
                    f,
                    "parsing error at line {}, column {}: {}",
                    line, column, message
                )
            }
            Error::Parsing { message, line, .. } => {
                write!(f, "parsing error at line {}: {}", line, message)
            }
            Error::Internal { message } => write!(f, "internal error: {}", message),
            Error::Operation { message } => write!(f, "operation error: {}", message),
        }
    }
}

impl std::error::Error for Error {}
