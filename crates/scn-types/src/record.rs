//! Records: the objects type handlers construct.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::value::{Fields, Value};

/// An object produced by a type handler.
///
/// The engine never looks inside a record except through [`Record::attr`],
/// which reference chains such as `$person_1.team.name` walk one step at a
/// time. Records are shared, so handlers that mutate objects after
/// construction (deferred methods) need interior mutability.
pub trait Record: Send + Sync + fmt::Debug {
    /// Name of the type this record belongs to.
    fn type_name(&self) -> &str;

    /// Read a named attribute. `None` if the record has no such attribute.
    fn attr(&self, name: &str) -> Option<Value>;

    /// Names of the attributes this record exposes, for display.
    fn attr_names(&self) -> Vec<String> {
        Vec::new()
    }

    /// Downcasting hook.
    fn as_any(&self) -> &dyn Any;
}

impl dyn Record {
    /// Downcast to a concrete record type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Shared handle to a record.
pub type ObjectRef = Arc<dyn Record>;

/// A general-purpose record: a type name plus a mutable field map.
pub struct Entity {
    type_name: String,
    fields: RwLock<Fields>,
}

impl Entity {
    pub fn new(type_name: impl Into<String>, fields: Fields) -> Self {
        Self {
            type_name: type_name.into(),
            fields: RwLock::new(fields),
        }
    }

    /// Read a field.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.read().expect("lock poisoned").get(name).cloned()
    }

    /// Set a field, replacing any previous value.
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.fields
            .write()
            .expect("lock poisoned")
            .insert(name.into(), value);
    }

    /// Append to a list field, creating the list if the field is absent.
    ///
    /// A non-list value already stored under `name` is kept as the first
    /// element of the new list.
    pub fn push(&self, name: &str, value: Value) {
        let mut fields = self.fields.write().expect("lock poisoned");
        let slot = fields.entry(name.to_string()).or_insert_with(|| Value::List(Vec::new()));
        match slot {
            Value::List(items) => items.push(value),
            other => {
                let previous = std::mem::take(other);
                *other = Value::List(vec![previous, value]);
            }
        }
    }

    /// Snapshot of all fields.
    pub fn fields(&self) -> Fields {
        self.fields.read().expect("lock poisoned").clone()
    }
}

impl Record for Entity {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attr(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn attr_names(&self) -> Vec<String> {
        self.fields.read().expect("lock poisoned").keys().cloned().collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.read().expect("lock poisoned");
        f.debug_struct("Entity")
            .field("type_name", &self.type_name)
            .field("fields", &*fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str) -> Entity {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::from(name));
        Entity::new("person", fields)
    }

    #[test]
    fn get_and_set() {
        let p = person("Alice");
        assert_eq!(p.get("name"), Some(Value::from("Alice")));
        p.set("name", Value::from("Alicia"));
        assert_eq!(p.get("name"), Some(Value::from("Alicia")));
        assert_eq!(p.get("age"), None);
    }

    #[test]
    fn push_creates_and_extends_lists() {
        let p = person("Alice");
        p.push("tags", Value::from("a"));
        p.push("tags", Value::from("b"));
        assert_eq!(
            p.get("tags"),
            Some(Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }

    #[test]
    fn push_onto_scalar_wraps_it() {
        let p = person("Alice");
        p.push("name", Value::from("Al"));
        assert_eq!(
            p.get("name"),
            Some(Value::List(vec![Value::from("Alice"), Value::from("Al")]))
        );
    }

    #[test]
    fn record_surface() {
        let obj: ObjectRef = Arc::new(person("Bob"));
        assert_eq!(obj.type_name(), "person");
        assert_eq!(obj.attr("name"), Some(Value::from("Bob")));
        assert_eq!(obj.attr_names(), vec!["name".to_string()]);
        assert!(obj.downcast_ref::<Entity>().is_some());
    }

    #[test]
    fn mutation_is_visible_through_shared_handles() {
        let obj: ObjectRef = Arc::new(person("Bob"));
        let alias = Arc::clone(&obj);
        obj.downcast_ref::<Entity>().unwrap().set("age", Value::Int(30));
        assert_eq!(alias.attr("age"), Some(Value::Int(30)));
    }
}
