//! Scenario specification documents.
//!
//! A specification is a mapping from type name to that type's definition.
//! This crate turns the supported inputs into a [`SpecDocument`] whose keys
//! keep their document order:
//!
//! - an in-memory [`serde_json::Value`]
//! - a file path (format chosen by extension)
//! - any reader or string with an explicit [`Format`]

pub mod document;
pub mod error;
pub mod source;

pub use document::SpecDocument;
pub use error::{DocumentError, DocumentResult};
pub use source::{Format, Source};
