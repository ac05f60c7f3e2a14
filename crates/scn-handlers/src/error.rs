use thiserror::Error;

/// Errors raised by type handlers.
///
/// These are domain errors: the engine passes them through untouched so
/// callers can tell a rejected definition from an engine failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HandlerError {
    /// A required constructor field was not supplied.
    #[error("{type_name}: missing required field '{field}'")]
    MissingField { type_name: String, field: String },

    /// A field had the wrong shape.
    #[error("{type_name}: field '{field}' expected {expected}, got {found}")]
    InvalidField {
        type_name: String,
        field: String,
        expected: String,
        found: String,
    },

    /// A deferred method was handed arguments it cannot use.
    #[error("{type_name}.{method}: {reason}")]
    InvalidArguments {
        type_name: String,
        method: String,
        reason: String,
    },

    /// The handler has no deferred method under this name.
    #[error("{type_name}: no method '{method}'")]
    UnknownMethod { type_name: String, method: String },

    /// Anything else a handler wants to reject.
    #[error("{type_name}: {reason}")]
    Rejected { type_name: String, reason: String },
}

impl HandlerError {
    pub fn rejected(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
