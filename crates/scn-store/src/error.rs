use scn_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No collection exists for the type.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// The type exists but nothing is stored under the id.
    #[error("no {type_name} with id {id}")]
    NotFound { type_name: String, id: ObjectId },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
