//! Reference tokens for scenario graphs.
//!
//! A reference is a string in a definition that points at another object,
//! optionally followed by a chain of attributes to read from it:
//!
//! ```text
//! $person_1            -> the person with id 1
//! $person_1.team.name  -> that person's team's name
//! ```
//!
//! The engine never parses references itself. It asks a
//! [`ReferenceHandler`] whether a value is a reference and, if so, for its
//! decomposed [`ReferenceToken`]. [`DefaultReferenceHandler`] implements the
//! syntax above; alternative syntaxes plug in by implementing the trait.
//!
//! # Modules
//!
//! - [`error`]: Error types for reference parsing and resolution
//! - [`token`]: The decomposed [`ReferenceToken`]
//! - [`traits`]: The [`ReferenceHandler`] trait
//! - [`syntax`]: [`DefaultReferenceHandler`] and its [`ReferenceSyntax`] settings

pub mod error;
pub mod syntax;
pub mod token;
pub mod traits;

pub use error::{RefError, Result};
pub use syntax::{DefaultReferenceHandler, ReferenceSyntax};
pub use token::ReferenceToken;
pub use traits::ReferenceHandler;
