use scn_document::DocumentError;
use scn_handlers::HandlerError;
use scn_refs::RefError;
use scn_store::StoreError;
use scn_types::ObjectId;
use thiserror::Error;

/// Errors from building or extending a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// No type handler is registered for the name.
    #[error("invalid type name '{0}'")]
    UnknownType(String),

    /// The type has a handler but was never declared or loaded.
    #[error("scenario doesn't have type '{0}'")]
    Undeclared(String),

    /// A type's raw definition is not a list, a mapping, or a count.
    #[error("type definition '{type_name}' must be a list, mapping or count; got {found}")]
    MalformedType {
        type_name: String,
        found: &'static str,
    },

    /// A single object definition is structurally invalid.
    #[error("malformed {type_name} definition: {reason}")]
    MalformedDefinition { type_name: String, reason: String },

    /// An object was referenced while its own type was still loading and
    /// before it had been stored.
    #[error("circular reference to {type_name} {id} while '{type_name}' is loading")]
    CircularReference { type_name: String, id: ObjectId },

    /// Reference parsing or resolution failed, with type context.
    #[error(transparent)]
    Reference(#[from] RefError),

    /// The type handler rejected a definition. Never wrapped.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Any other failure while loading a type. Nested loads nest here too.
    #[error("error loading type '{type_name}': {source}")]
    Load {
        type_name: String,
        #[source]
        source: Box<ScenarioError>,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ScenarioError {
    /// Attach the name of the type being loaded.
    ///
    /// Handler errors and malformed or circular definitions pass through,
    /// reference errors gain one level of type context, and everything else
    /// (including unknown or undeclared types reached through a reference)
    /// becomes a [`Load`](Self::Load) failure naming `type_name`.
    pub fn in_type(self, type_name: &str) -> Self {
        match self {
            Self::Reference(err) => Self::Reference(err.in_type(type_name)),
            err @ (Self::Handler(_)
            | Self::MalformedType { .. }
            | Self::MalformedDefinition { .. }
            | Self::CircularReference { .. }) => err,
            other => Self::Load {
                type_name: type_name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Types whose loads this error passed through, outermost first.
    pub fn type_chain(&self) -> Vec<&str> {
        match self {
            Self::Load { type_name, source } => {
                let mut chain = vec![type_name.as_str()];
                chain.extend(source.type_chain());
                chain
            }
            Self::Reference(err) => err.type_chain(),
            _ => Vec::new(),
        }
    }

    /// The innermost error beneath any [`Load`](Self::Load) wrapping.
    pub fn root(&self) -> &ScenarioError {
        match self {
            Self::Load { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns `true` for errors raised by a type handler.
    pub fn is_handler_error(&self) -> bool {
        matches!(self, Self::Handler(_))
    }
}

/// Result alias for scenario operations.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
