//! The loading orchestrator and the typed query surface.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use scn_document::{SpecDocument, Source};
use scn_handlers::{HandlerRegistry, TypeHandler};
use scn_refs::ReferenceHandler;
use scn_store::ObjectStore;
use scn_types::{pluralize, ObjectId, ObjectRef, Value};
use tracing::{debug, info};

use crate::builder::ScenarioBuilder;
use crate::config::ScenarioConfig;
use crate::error::{ScenarioError, ScenarioResult};
use crate::node::{DeferredInvocation, Node, TypeDefinition};
use crate::tree::Methods;

/// Where a type is in its load lifecycle.
///
/// A type moves `Unloaded -> Loading -> Loaded` exactly once. It enters
/// `Loading` before any of its own references resolve, so re-entrant lazy
/// loads never load it twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

/// A built object graph.
///
/// Objects are created by type handlers from a [`SpecDocument`], stored per
/// type under numeric ids, and can be queried or extended afterwards.
///
/// ```
/// use scn_engine::Scenario;
/// use scn_handlers::{EntityHandler, HandlerRegistry};
/// use scn_types::{ObjectId, Value};
/// use serde_json::json;
///
/// let handlers = HandlerRegistry::new()
///     .with(EntityHandler::new("team"))
///     .with(EntityHandler::new("person").with_plural("people"));
///
/// let scenario = Scenario::builder(handlers)
///     .build(json!({
///         "people": [{"name": "Alice", "team": "$team_1.name"}],
///         "teams": [{"name": "red"}],
///     }).into())
///     .unwrap();
///
/// let alice = scenario.by_id("person", ObjectId::new(1)).unwrap().unwrap();
/// assert_eq!(alice.attr("team"), Some(Value::from("red")));
/// ```
pub struct Scenario {
    pub(crate) document: SpecDocument,
    pub(crate) handlers: HandlerRegistry,
    pub(crate) references: Arc<dyn ReferenceHandler>,
    pub(crate) config: ScenarioConfig,
    pub(crate) store: ObjectStore,
    pub(crate) states: HashMap<String, LoadState>,
}

impl Scenario {
    /// Start configuring a scenario over the given handlers.
    pub fn builder(handlers: HandlerRegistry) -> ScenarioBuilder {
        ScenarioBuilder::new(handlers)
    }

    /// Build a scenario with the default reference syntax.
    pub fn load(
        source: Source,
        handlers: HandlerRegistry,
        load_priority: &[&str],
    ) -> ScenarioResult<Self> {
        Self::builder(handlers)
            .load_priority(load_priority.iter().copied())
            .build(source)
    }

    pub(crate) fn new(
        document: SpecDocument,
        handlers: HandlerRegistry,
        references: Arc<dyn ReferenceHandler>,
        config: ScenarioConfig,
    ) -> Self {
        Self {
            document,
            handlers,
            references,
            config,
            store: ObjectStore::new(),
            states: HashMap::new(),
        }
    }

    // ---------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------

    /// Load every declared type.
    ///
    /// Priority types go first, in the configured order. The remaining
    /// document keys follow in document order, skipping types that are
    /// already loaded (including those pulled in by references).
    pub(crate) fn load_all(&mut self) -> ScenarioResult<()> {
        for name in self.config.load_priority.clone() {
            self.load_type(&name, None)?;
        }

        let declared: Vec<(String, serde_json::Value)> = self
            .document
            .iter()
            .map(|(key, def)| (key.to_string(), def.clone()))
            .collect();
        for (key, def) in declared {
            let type_name = self.canonical_type(&key)?;
            if self.state(&type_name) == LoadState::Unloaded {
                self.load_type(&key, Some(def))?;
            }
        }

        info!(
            types = self.store.type_names().len(),
            objects = self.store.len(),
            "scenario built"
        );
        Ok(())
    }

    /// Load one type from its raw definition.
    ///
    /// Without `type_def`, the definition is looked up in the document. A
    /// type that is already loading or loaded is left alone.
    pub(crate) fn load_type(
        &mut self,
        name: &str,
        type_def: Option<serde_json::Value>,
    ) -> ScenarioResult<()> {
        let type_name = self.canonical_type(name)?;
        if self.state(&type_name) != LoadState::Unloaded {
            return Ok(());
        }

        let raw = match type_def {
            Some(raw) => raw,
            None => self
                .declared_definition(name, &type_name)
                .cloned()
                .ok_or_else(|| ScenarioError::Undeclared(type_name.clone()))?,
        };
        let definition =
            TypeDefinition::classify(&raw).map_err(|found| ScenarioError::MalformedType {
                type_name: type_name.clone(),
                found,
            })?;

        self.states.insert(type_name.clone(), LoadState::Loading);
        self.store.ensure_type(&type_name);

        for object_def in definition.into_objects() {
            self.load_one(&type_name, object_def)?;
        }

        self.states.insert(type_name.clone(), LoadState::Loaded);
        info!(
            %type_name,
            count = self.store.collection(&type_name).map(|c| c.len()).unwrap_or(0),
            "type loaded"
        );
        Ok(())
    }

    /// Build, store, and finish one object, attaching type context to errors.
    fn load_one(&mut self, type_name: &str, raw: serde_json::Value) -> ScenarioResult<ObjectRef> {
        self.create_object(type_name, raw)
            .map_err(|err| err.in_type(type_name))
    }

    fn create_object(&mut self, type_name: &str, raw: serde_json::Value) -> ScenarioResult<ObjectRef> {
        let handler = self.handler(type_name)?;

        let (mut explicit_id, raw) = self.pop_id(type_name, raw)?;
        let node = Node::classify(&raw, self.references.as_ref());

        let mut deferred = Vec::new();
        let fields = {
            let mut methods = Methods::Extract {
                handler: &handler,
                deferred: &mut deferred,
            };
            match node {
                Node::Mapping(map) => self.resolve_mapping(map, &mut methods)?,
                other => {
                    let kind = other.kind();
                    match self.resolve_node(other, &mut methods)? {
                        // A mapping reached through a reference can still claim an id.
                        Value::Map(mut fields) => {
                            if let Some(raw_id) = fields.shift_remove(&self.config.id_field) {
                                explicit_id = self.parse_id(type_name, &raw_id.to_json())?;
                            }
                            fields
                        }
                        Value::Null => Default::default(),
                        resolved => {
                            return Err(ScenarioError::MalformedDefinition {
                                type_name: type_name.to_string(),
                                reason: format!(
                                    "a {kind} definition must resolve to a mapping, got {}",
                                    resolved.kind()
                                ),
                            })
                        }
                    }
                }
            }
        };

        let object = handler.create(fields)?;
        let id = self.store.add(type_name, object.clone(), explicit_id);

        for invocation in deferred {
            self.replay(type_name, id, &object, invocation)?;
        }
        Ok(object)
    }

    /// Call a deferred method on a constructed object, resolving its
    /// arguments now.
    fn replay(
        &mut self,
        type_name: &str,
        id: ObjectId,
        object: &ObjectRef,
        invocation: DeferredInvocation,
    ) -> ScenarioResult<()> {
        let args = self.resolve_arguments(invocation.argument)?;
        debug!(type_name, %id, method = %invocation.field, args = args.len(), "replaying deferred method");
        (invocation.method)(object, args)?;
        Ok(())
    }

    /// Split the explicit id off a mapping definition.
    fn pop_id(
        &self,
        type_name: &str,
        raw: serde_json::Value,
    ) -> ScenarioResult<(Option<ObjectId>, serde_json::Value)> {
        let serde_json::Value::Object(mut map) = raw else {
            return Ok((None, raw));
        };
        let id = match map.shift_remove(&self.config.id_field) {
            Some(raw_id) => self.parse_id(type_name, &raw_id)?,
            None => None,
        };
        Ok((id, serde_json::Value::Object(map)))
    }

    fn parse_id(&self, type_name: &str, raw_id: &serde_json::Value) -> ScenarioResult<Option<ObjectId>> {
        ObjectId::from_json(raw_id).map_err(|err| ScenarioError::MalformedDefinition {
            type_name: type_name.to_string(),
            reason: err.to_string(),
        })
    }

    // ---------------------------------------------------------------
    // Type names
    // ---------------------------------------------------------------

    /// The registered type name `name` refers to.
    pub(crate) fn canonical_type(&self, name: &str) -> ScenarioResult<String> {
        self.handlers
            .resolve(name, &self.config.plural_suffix)
            .map(|h| h.type_name().to_string())
            .ok_or_else(|| ScenarioError::UnknownType(name.to_string()))
    }

    fn handler(&self, type_name: &str) -> ScenarioResult<Arc<dyn TypeHandler>> {
        self.handlers
            .resolve(type_name, &self.config.plural_suffix)
            .cloned()
            .ok_or_else(|| ScenarioError::UnknownType(type_name.to_string()))
    }

    /// Raw definition for a type: canonical name, declared plural, suffixed
    /// plural, then the name as written.
    fn declared_definition(&self, name: &str, type_name: &str) -> Option<&serde_json::Value> {
        let plural = self
            .handlers
            .get(type_name)
            .map(|h| h.plural())
            .unwrap_or_else(|| pluralize(type_name, &self.config.plural_suffix));
        self.document
            .get(type_name)
            .or_else(|| self.document.get(&plural))
            .or_else(|| self.document.get(&pluralize(type_name, &self.config.plural_suffix)))
            .or_else(|| self.document.get(name))
    }

    /// Canonical name of a type that already has a collection.
    fn known_type(&self, name: &str) -> ScenarioResult<String> {
        let type_name = self
            .canonical_type(name)
            .unwrap_or_else(|_| self.config.singular_of(name).to_string());
        if self.store.contains_type(&type_name) {
            Ok(type_name)
        } else {
            Err(ScenarioError::Undeclared(type_name))
        }
    }

    // ---------------------------------------------------------------
    // Query surface
    // ---------------------------------------------------------------

    /// Load state of a type (singular or plural name).
    pub fn state(&self, name: &str) -> LoadState {
        let type_name = self
            .canonical_type(name)
            .unwrap_or_else(|_| name.to_string());
        self.states
            .get(&type_name)
            .copied()
            .unwrap_or(LoadState::Unloaded)
    }

    /// All objects of a type, in insertion order.
    pub fn collection(&self, name: &str) -> ScenarioResult<Vec<ObjectRef>> {
        let type_name = self.known_type(name)?;
        Ok(self.store.all(&type_name)?)
    }

    /// One object by type and id. An unknown id is `Ok(None)`.
    pub fn by_id(&self, name: &str, id: ObjectId) -> ScenarioResult<Option<ObjectRef>> {
        let type_name = self.known_type(name)?;
        Ok(self.store.by_id(&type_name, id)?)
    }

    /// Ids of a type, in insertion order.
    pub fn ids(&self, name: &str) -> ScenarioResult<Vec<ObjectId>> {
        let type_name = self.known_type(name)?;
        Ok(self.store.ids(&type_name)?)
    }

    /// Current id of an object, compared by identity.
    pub fn id_of(&self, name: &str, object: &ObjectRef) -> ScenarioResult<Option<ObjectId>> {
        let type_name = self.known_type(name)?;
        Ok(self.store.collection(&type_name)?.id_of(object))
    }

    /// Add one object of an already loaded type.
    ///
    /// `fields` goes through the same path as a document definition:
    /// references resolve, method fields replay after construction, and an
    /// `id` field claims that id, relocating any current holder.
    pub fn add(&mut self, name: &str, fields: serde_json::Value) -> ScenarioResult<ObjectRef> {
        let type_name = match self.canonical_type(name) {
            Ok(type_name) if self.store.contains_type(&type_name) => type_name,
            _ => return Err(ScenarioError::UnknownType(name.to_string())),
        };
        self.load_one(&type_name, fields)
    }

    /// Types with a collection, in the order they started loading.
    pub fn type_names(&self) -> Vec<String> {
        self.store.type_names()
    }

    /// Total number of objects.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn document(&self) -> &SpecDocument {
        &self.document
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("types", &self.store.type_names())
            .field("object_count", &self.store.len())
            .finish()
    }
}
