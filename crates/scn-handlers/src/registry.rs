//! Handlers by type name.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use scn_types::singularize;
use tracing::debug;

use crate::traits::TypeHandler;

/// Type handlers keyed by their singular type name.
///
/// Lookups accept the singular name, the handler's declared plural, or any
/// name that becomes a registered type name once a plural suffix is
/// stripped.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: IndexMap<String, Arc<dyn TypeHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous handler for the same type.
    pub fn register(&mut self, handler: impl TypeHandler + 'static) -> &mut Self {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(&mut self, handler: Arc<dyn TypeHandler>) -> &mut Self {
        let name = handler.type_name().to_string();
        debug!(type_name = %name, plural = %handler.plural(), "registered type handler");
        self.handlers.insert(name, handler);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, handler: impl TypeHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Find the handler for `name`.
    ///
    /// Tries, in order: the exact type name, a handler whose plural is
    /// `name`, and `name` with one `suffix` stripped.
    pub fn resolve(&self, name: &str, suffix: &str) -> Option<&Arc<dyn TypeHandler>> {
        if let Some(handler) = self.handlers.get(name) {
            return Some(handler);
        }
        if let Some(handler) = self.handlers.values().find(|h| h.plural() == name) {
            return Some(handler);
        }
        self.handlers.get(singularize(name, suffix))
    }

    /// Handler registered under exactly `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn TypeHandler>> {
        self.handlers.get(type_name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: TypeHandler + 'static> FromIterator<H> for HandlerRegistry {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut registry = Self::new();
        for handler in iter {
            registry.register(handler);
        }
        registry
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityHandler;

    fn registry() -> HandlerRegistry {
        HandlerRegistry::new()
            .with(EntityHandler::new("person").with_plural("people"))
            .with(EntityHandler::new("team"))
    }

    #[test]
    fn resolves_singular_and_plural_names() {
        let r = registry();
        assert_eq!(r.resolve("person", "s").unwrap().type_name(), "person");
        assert_eq!(r.resolve("people", "s").unwrap().type_name(), "person");
        assert_eq!(r.resolve("team", "s").unwrap().type_name(), "team");
        assert_eq!(r.resolve("teams", "s").unwrap().type_name(), "team");
        assert!(r.resolve("persons", "").is_none());
        assert!(r.resolve("ghost", "s").is_none());
    }

    #[test]
    fn suffix_stripping_is_a_fallback() {
        let r = registry();
        assert_eq!(r.resolve("persons", "s").unwrap().type_name(), "person");
    }

    #[test]
    fn register_replaces_same_type() {
        let mut r = registry();
        r.register(EntityHandler::new("team").with_plural("squads"));
        assert_eq!(r.len(), 2);
        assert_eq!(r.resolve("squads", "s").unwrap().type_name(), "team");
    }

    #[test]
    fn collects_from_iterator() {
        let r: HandlerRegistry = ["a", "b"].into_iter().map(|name| EntityHandler::new(name)).collect();
        assert_eq!(r.type_names(), vec!["a", "b"]);
        assert!(!r.is_empty());
    }
}
