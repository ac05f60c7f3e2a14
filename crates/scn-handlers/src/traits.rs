use std::sync::Arc;

use scn_types::{Fields, ObjectRef, Value};

use crate::error::HandlerResult;

/// A post-construction call: receives the constructed object and the
/// resolved arguments.
pub type DeferredMethod = Arc<dyn Fn(&ObjectRef, Vec<Value>) -> HandlerResult<()> + Send + Sync>;

/// Builds objects of one type.
///
/// The trait is object-safe and `Send + Sync` so handlers can be stored as
/// `Arc<dyn TypeHandler>` in a [`HandlerRegistry`](crate::HandlerRegistry).
pub trait TypeHandler: Send + Sync {
    /// Singular type name, used in store keys and references.
    fn type_name(&self) -> &str;

    /// Plural form accepted in documents and collection lookups.
    fn plural(&self) -> String {
        format!("{}s", self.type_name())
    }

    /// Construct a new object from resolved fields.
    fn create(&self, fields: Fields) -> HandlerResult<ObjectRef>;

    /// Whether `field` names a deferred method rather than a constructor field.
    fn is_method(&self, field: &str) -> bool;

    /// The deferred method behind `field`, if [`is_method`](Self::is_method) holds.
    fn special_method(&self, field: &str) -> Option<DeferredMethod>;
}
