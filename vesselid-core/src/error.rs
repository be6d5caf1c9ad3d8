//! Error types for vesselid core.

use std::{error::Error, fmt, io};

/// Error type for vesselid core operations.
///
/// Rejected identifiers are never reported through this type; they come back as a
/// [`ValidationResult`](crate::ValidationResult) with `valid == false`.
#[derive(Debug)]
pub enum VesselIdError {
    /// An underlying I/O error.
    Io(io::Error),
    /// An option value that does not name a known variant.
    InvalidOption {
        /// The option being parsed (for example `number type`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for VesselIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::InvalidOption { kind, value } => write!(f, "unknown {kind}: {value}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for VesselIdError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VesselIdError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Convenience result type for vesselid core.
pub type Result<T> = std::result::Result<T, VesselIdError>;
