//! Scenario graph builder.
//!
//! Turns a specification (type name to object definitions) into a graph of
//! typed objects built by pluggable type handlers, resolving references
//! between objects as it goes.
//!
//! # Loading
//!
//! Priority types load first, then the remaining document keys in document
//! order. A reference to a type that has not loaded yet loads it on the spot.
//! Each object definition is walked once: references resolve to the values
//! they name, and fields the handler marks as methods are set aside and
//! replayed against the finished object.
//!
//! # Ids
//!
//! Objects without an `id` field get the next free id of their type,
//! starting at 1. An explicit id always wins; if it is taken, the current
//! holder is moved to a new id first. Anything holding on to the old id
//! afterwards sees the new object.
//!
//! # Cycles
//!
//! Referencing an object of a type that is still loading, before that object
//! exists, fails with [`ScenarioError::CircularReference`].

pub mod builder;
pub mod config;
pub mod error;
pub mod node;
mod resolver;
pub mod scenario;
mod tree;

pub use builder::ScenarioBuilder;
pub use config::ScenarioConfig;
pub use error::{ScenarioError, ScenarioResult};
pub use node::{DeferredInvocation, Node, TypeDefinition};
pub use scenario::{LoadState, Scenario};

// Re-export the collaborator crates callers need to build a scenario.
pub use scn_document::{Format, Source, SpecDocument};
pub use scn_handlers::{EntityHandler, HandlerError, HandlerRegistry, TypeHandler};
pub use scn_refs::{DefaultReferenceHandler, RefError, ReferenceHandler, ReferenceSyntax, ReferenceToken};
pub use scn_types::{Entity, Fields, ObjectId, ObjectRef, Record, Value};
