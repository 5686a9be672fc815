//! Restore error types

use std::fmt;
use crate::descriptor::ParseTokenError;

/// Errors that can occur when turning a stored wire query back into a descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreError {
    /// A vocabulary token (`cl`, `ty`, `ec`, `gbt`, `en`, `pty`) is not recognized
    UnknownToken(ParseTokenError),
    /// A wire operator has no token in the vocabulary for its datatype
    UnknownOperator { operator: String, datatype: String },
    /// A datetime value is not the JSON window the builder writes
    InvalidValue { property: String, reason: String },
    /// `fr`/`to` is not a representable timestamp
    InvalidTimestamp(i64),
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreError::UnknownToken(e) => write!(f, "{}", e),
            RestoreError::UnknownOperator { operator, datatype } => {
                write!(f, "Unknown {} operator '{}'", datatype, operator)
            }
            RestoreError::InvalidValue { property, reason } => {
                write!(f, "Invalid stored value for '{}': {}", property, reason)
            }
            RestoreError::InvalidTimestamp(ts) => write!(f, "Invalid timestamp {}", ts),
        }
    }
}

impl std::error::Error for RestoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RestoreError::UnknownToken(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseTokenError> for RestoreError {
    fn from(err: ParseTokenError) -> Self {
        RestoreError::UnknownToken(err)
    }
}
