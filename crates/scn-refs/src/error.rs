//! Error types for reference operations.

use scn_types::ObjectId;
use thiserror::Error;

/// Errors that can occur while parsing or resolving a reference.
#[derive(Debug, Error)]
pub enum RefError {
    /// The string looked like a reference but could not be decomposed.
    #[error("invalid reference {reference:?}: {reason}")]
    InvalidSyntax { reference: String, reason: String },

    /// The referenced object does not exist.
    #[error("reference {reference:?}: no {type_name} with id {id}")]
    NotFound {
        reference: String,
        type_name: String,
        id: ObjectId,
    },

    /// A step in the attribute chain does not exist.
    #[error("reference {reference:?}: {kind} has no attribute {attr:?}")]
    MissingAttribute {
        reference: String,
        attr: String,
        kind: String,
    },

    /// A reference failed while loading the named type.
    #[error("error loading type '{type_name}': {source}")]
    InType {
        type_name: String,
        #[source]
        source: Box<RefError>,
    },
}

impl RefError {
    pub fn syntax(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Attach the name of the type whose load triggered this failure.
    pub fn in_type(self, type_name: impl Into<String>) -> Self {
        Self::InType {
            type_name: type_name.into(),
            source: Box::new(self),
        }
    }

    /// Type names from the outermost load down to the failing reference.
    pub fn type_chain(&self) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self;
        while let Self::InType { type_name, source } = current {
            chain.push(type_name.as_str());
            current = source;
        }
        chain
    }

    /// The failure without any type context.
    pub fn root(&self) -> &RefError {
        match self {
            Self::InType { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience type alias for reference operations.
pub type Result<T> = std::result::Result<T, RefError>;
