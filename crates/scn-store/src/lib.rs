//! Object storage and id allocation for scenario graphs.
//!
//! Objects are keyed by `(type name, id)`. Each type owns a collection and an
//! id counter. The store never interprets the objects it holds.
//!
//! # Design Rules
//!
//! 1. Within a type, ids are unique among stored objects at all times.
//! 2. An explicit id always wins. A colliding occupant is relocated to a
//!    freshly generated id; it is never overwritten or rejected.
//! 3. Generated ids start at 1 and never land on an occupied slot.
//! 4. Objects are never removed, only relocated. Holders of the old id see a
//!    different object (or none) afterwards.
//! 5. Iteration follows insertion order, not numeric id order.

pub mod collection;
pub mod error;
pub mod store;

pub use collection::Collection;
pub use error::{StoreError, StoreResult};
pub use store::ObjectStore;
