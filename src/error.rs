//! Error types for loading and typed access.
//!
//! Loading failures carry the 1-based number of the offending line.
//! Typed-access failures carry the key and, for constrained value sets,
//! every accepted spelling.

use std::fmt;
use std::io;

/// Errors raised while interpreting input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Section header line that is not `[`, inner path, `]`, or that carries
    /// a `;` anywhere.
    MalformedHeader { line: usize },
    /// Line that is none of comment, blank, section header, or assignment,
    /// or a `.=` shorthand with no preceding key.
    UnrecognizedLine { line: usize },
}

impl FormatError {
    /// 1-based line number the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            FormatError::MalformedHeader { line } | FormatError::UnrecognizedLine { line } => *line,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MalformedHeader { line } => {
                write!(f, "Malformed section header at line {line}")
            }
            FormatError::UnrecognizedLine { line } => write!(
                f,
                "Couldn't find a section, comment, or key-value assignment at line {line}"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors raised by the stream- and file-based load entry points.
#[derive(Debug)]
pub enum LoadError {
    /// The input violated the format.
    Format(FormatError),
    /// The underlying reader failed.
    Io(io::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Format(err) => write!(f, "{err}"),
            LoadError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Format(err) => Some(err),
            LoadError::Io(err) => Some(err),
        }
    }
}

impl From<FormatError> for LoadError {
    fn from(err: FormatError) -> Self {
        LoadError::Format(err)
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

/// Errors raised by the typed getters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No value stored under the key.
    Missing { key: String, expected: &'static str },
    /// The stored value does not convert to the requested type.
    Invalid { key: String, expected: &'static str },
    /// The stored value is outside a fixed value set.
    Choice {
        key: String,
        expected: &'static str,
        allowed: String,
    },
}

impl ParseError {
    /// Key the failing getter was asked for.
    pub fn key(&self) -> &str {
        match self {
            ParseError::Missing { key, .. }
            | ParseError::Invalid { key, .. }
            | ParseError::Choice { key, .. } => key,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Missing { key, expected } => {
                write!(f, "Failed to parse as {expected} (key: {key}) no values found")
            }
            ParseError::Invalid { key, expected } => {
                write!(f, "Failed to parse as {expected} (key: {key})")
            }
            ParseError::Choice {
                key,
                expected,
                allowed,
            } => write!(
                f,
                "Failed to parse as {expected} (key: {key}) valid values: {allowed}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}
