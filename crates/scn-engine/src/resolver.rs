//! Resolving reference tokens against the object store.
//!
//! Syntax belongs to the injected [`ReferenceHandler`]; this module owns
//! what happens after a token is decomposed: lazily loading the referenced
//! type, fetching the object, and walking the attribute chain.
//!
//! [`ReferenceHandler`]: scn_refs::ReferenceHandler

use scn_refs::RefError;
use scn_types::Value;
use tracing::debug;

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::{LoadState, Scenario};

impl Scenario {
    /// Resolve a reference string to the value it points at.
    ///
    /// The referenced type is loaded from the document first if nothing has
    /// loaded it yet.
    pub(crate) fn resolve_reference(&mut self, reference: &str) -> ScenarioResult<Value> {
        let token = self.references.parse(reference)?;
        let type_name = self.canonical_type(&token.type_name)?;

        if self.state(&type_name) == LoadState::Unloaded {
            debug!(%type_name, reference, "lazy-loading referenced type");
            self.load_type(&type_name, None)?;
        }

        let Some(object) = self.store.by_id(&type_name, token.id)? else {
            if self.state(&type_name) == LoadState::Loading {
                return Err(ScenarioError::CircularReference {
                    type_name,
                    id: token.id,
                });
            }
            return Err(RefError::NotFound {
                reference: reference.to_string(),
                type_name,
                id: token.id,
            }
            .into());
        };

        let mut value = Value::Object(object);
        for attr in &token.attrs {
            value = value.attr(attr).ok_or_else(|| RefError::MissingAttribute {
                reference: reference.to_string(),
                attr: attr.clone(),
                kind: match &value {
                    Value::Object(obj) => obj.type_name().to_string(),
                    other => other.kind().to_string(),
                },
            })?;
        }
        Ok(value)
    }
}
