//! The [`ReferenceHandler`] trait.

use crate::error::Result;
use crate::token::ReferenceToken;

/// Recognises and decomposes reference tokens.
///
/// Implementations are pure: they know the reference syntax but nothing about
/// which objects exist. Resolution against stored objects is the engine's
/// job.
pub trait ReferenceHandler: Send + Sync {
    /// Whether an arbitrary definition value is a reference.
    fn is_reference(&self, value: &serde_json::Value) -> bool;

    /// Decompose a reference string.
    ///
    /// Only called on strings for which [`is_reference`] returned `true`.
    ///
    /// [`is_reference`]: ReferenceHandler::is_reference
    fn parse(&self, reference: &str) -> Result<ReferenceToken>;
}
