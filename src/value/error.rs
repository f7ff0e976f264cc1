use crate::kind::ScalarKind;
use thiserror::Error;

/// Errors that can occur when converting a raw filter value to a typed value
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseValueError {
    #[error("Invalid {kind} value: '{value}'")]
    Invalid { kind: ScalarKind, value: String },

    #[error("{kind} value '{value}' is outside the range {min}..={max}")]
    OutOfRange {
        kind: ScalarKind,
        value: String,
        min: String,
        max: String,
    },
}

impl ParseValueError {
    pub fn invalid(kind: ScalarKind, value: &str) -> Self {
        ParseValueError::Invalid {
            kind,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> ScalarKind {
        match self {
            ParseValueError::Invalid { kind, .. } | ParseValueError::OutOfRange { kind, .. } => {
                *kind
            }
        }
    }
}
