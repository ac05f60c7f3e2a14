//! A configurable handler that builds [`Entity`] records.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use scn_types::{Entity, Fields, ObjectRef, Value};

use crate::error::{HandlerError, HandlerResult};
use crate::traits::{DeferredMethod, TypeHandler};

/// Handler producing [`Entity`] records, configured builder-style.
///
/// ```
/// use scn_handlers::{EntityHandler, TypeHandler};
/// use scn_types::{Fields, Value};
///
/// let handler = EntityHandler::new("person")
///     .with_plural("people")
///     .require("name")
///     .default_value("active", Value::Bool(true))
///     .appender("join", "teams");
///
/// assert!(handler.is_method("join"));
/// assert!(!handler.is_method("name"));
///
/// let mut fields = Fields::new();
/// fields.insert("name".into(), Value::from("Alice"));
/// let alice = handler.create(fields).unwrap();
/// assert_eq!(alice.attr("active"), Some(Value::Bool(true)));
/// ```
pub struct EntityHandler {
    type_name: String,
    plural: Option<String>,
    required: Vec<String>,
    defaults: Fields,
    methods: IndexMap<String, DeferredMethod>,
}

impl EntityHandler {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            plural: None,
            required: Vec::new(),
            defaults: Fields::new(),
            methods: IndexMap::new(),
        }
    }

    /// Override the default `<type_name>s` plural.
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Reject definitions that do not supply `field`.
    pub fn require(mut self, field: impl Into<String>) -> Self {
        self.required.push(field.into());
        self
    }

    /// Fill `field` with `value` when a definition leaves it out.
    pub fn default_value(mut self, field: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(field.into(), value);
        self
    }

    /// Register a deferred method under `name`.
    pub fn method<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ObjectRef, Vec<Value>) -> HandlerResult<()> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(f));
        self
    }

    /// Deferred method `name` that stores its argument in `field`.
    pub fn setter(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        let name = name.into();
        let method = set_field(&self.type_name, &name, field);
        self.methods.insert(name, method);
        self
    }

    /// Deferred method `name` that appends its arguments to the list in `field`.
    pub fn appender(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        let name = name.into();
        let method = append_to(&self.type_name, &name, field);
        self.methods.insert(name, method);
        self
    }

    /// Names of the registered deferred methods.
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.keys().map(String::as_str).collect()
    }
}

impl TypeHandler for EntityHandler {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn plural(&self) -> String {
        self.plural
            .clone()
            .unwrap_or_else(|| format!("{}s", self.type_name))
    }

    fn create(&self, fields: Fields) -> HandlerResult<ObjectRef> {
        for field in &self.required {
            if !fields.contains_key(field) {
                return Err(HandlerError::MissingField {
                    type_name: self.type_name.clone(),
                    field: field.clone(),
                });
            }
        }

        let mut merged = self.defaults.clone();
        merged.extend(fields);
        Ok(Arc::new(Entity::new(self.type_name.clone(), merged)))
    }

    fn is_method(&self, field: &str) -> bool {
        self.methods.contains_key(field)
    }

    fn special_method(&self, field: &str) -> Option<DeferredMethod> {
        self.methods.get(field).cloned()
    }
}

impl fmt::Debug for EntityHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityHandler")
            .field("type_name", &self.type_name)
            .field("plural", &self.plural())
            .field("required", &self.required)
            .field("methods", &self.method_names())
            .finish()
    }
}

fn as_entity<'a>(type_name: &str, method: &str, obj: &'a ObjectRef) -> HandlerResult<&'a Entity> {
    obj.downcast_ref::<Entity>()
        .ok_or_else(|| HandlerError::InvalidArguments {
            type_name: type_name.to_string(),
            method: method.to_string(),
            reason: format!("target is a {}, not an entity", obj.type_name()),
        })
}

/// A deferred method that stores its argument in `field`.
///
/// One argument is stored as is; several are stored as a list. Calling it
/// without arguments is an error.
pub fn set_field(type_name: &str, method: &str, field: impl Into<String>) -> DeferredMethod {
    let type_name = type_name.to_string();
    let method = method.to_string();
    let field = field.into();
    Arc::new(move |obj: &ObjectRef, mut args: Vec<Value>| {
        let entity = as_entity(&type_name, &method, obj)?;
        let value = match args.len() {
            0 => {
                return Err(HandlerError::InvalidArguments {
                    type_name: type_name.clone(),
                    method: method.clone(),
                    reason: "expected at least one argument".into(),
                })
            }
            1 => args.remove(0),
            _ => Value::List(args),
        };
        entity.set(field.clone(), value);
        Ok(())
    })
}

/// A deferred method that appends each of its arguments to the list in `field`.
pub fn append_to(type_name: &str, method: &str, field: impl Into<String>) -> DeferredMethod {
    let type_name = type_name.to_string();
    let method = method.to_string();
    let field = field.into();
    Arc::new(move |obj: &ObjectRef, args: Vec<Value>| {
        let entity = as_entity(&type_name, &method, obj)?;
        for arg in args {
            entity.push(&field, arg);
        }
        Ok(())
    })
}
