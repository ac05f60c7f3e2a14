//! Foundation types for scenario graphs.
//!
//! Every other `scn-*` crate depends on `scn-types`. It defines the small
//! vocabulary shared by the store, the reference handlers, the type handlers
//! and the engine.
//!
//! # Key Types
//!
//! - [`ObjectId`]: Per-type numeric identifier, allocated from 1
//! - [`Value`]: A fully resolved value: scalar, list, map, or object
//! - [`Record`]: The opaque object a type handler produces
//! - [`ObjectRef`]: Shared handle to a [`Record`]
//! - [`Entity`]: General-purpose record backed by a field map

pub mod error;
pub mod id;
pub mod naming;
pub mod record;
pub mod value;

pub use error::TypeError;
pub use id::ObjectId;
pub use naming::{pluralize, singularize};
pub use record::{Entity, ObjectRef, Record};
pub use value::{Fields, Value};
