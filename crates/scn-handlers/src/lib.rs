//! Type handlers for scenario graphs.
//!
//! A type handler knows how to build one kind of object. The engine hands it
//! fully resolved constructor fields and gets back an [`ObjectRef`]. Fields
//! the handler declares as *methods* are kept out of the constructor and
//! replayed against the finished object instead, which is how objects get
//! wired to things that only exist after they do.
//!
//! - [`TypeHandler`]: The handler contract
//! - [`EntityHandler`]: Builder-style handler producing [`Entity`] records
//! - [`HandlerRegistry`]: Handlers by type name, with plural lookup
//!
//! [`ObjectRef`]: scn_types::ObjectRef
//! [`Entity`]: scn_types::Entity

pub mod entity;
pub mod error;
pub mod registry;
pub mod traits;

pub use entity::{append_to, set_field, EntityHandler};
pub use error::{HandlerError, HandlerResult};
pub use registry::HandlerRegistry;
pub use traits::{DeferredMethod, TypeHandler};
