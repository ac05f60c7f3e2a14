//! Definition trees and type definitions.
//!
//! Raw document values are classified once into a closed set of node kinds,
//! so the tree processor dispatches on a tag instead of probing shapes.

use indexmap::IndexMap;
use scn_handlers::DeferredMethod;
use scn_refs::ReferenceHandler;
use scn_types::Value;

/// One node of an object definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Field name to sub-definition, in document order.
    Mapping(IndexMap<String, Node>),
    /// Ordered sub-definitions.
    Sequence(Vec<Node>),
    /// A reference string, resolved against the object store.
    Reference(String),
    /// Anything else, passed through as is.
    Scalar(Value),
}

impl Node {
    /// Classify a raw document value.
    ///
    /// Only strings can be references, since a reference is decomposed from
    /// its text.
    pub fn classify(raw: &serde_json::Value, references: &dyn ReferenceHandler) -> Node {
        match raw {
            serde_json::Value::Object(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::classify(v, references)))
                    .collect(),
            ),
            serde_json::Value::Array(items) => {
                Node::Sequence(items.iter().map(|v| Node::classify(v, references)).collect())
            }
            serde_json::Value::String(s) if references.is_reference(raw) => {
                Node::Reference(s.clone())
            }
            other => Node::Scalar(Value::from(other.clone())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::Reference(_) => "reference",
            Node::Scalar(_) => "scalar",
        }
    }
}

/// The raw definition of a whole type, by shape.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    /// One object per element.
    Sequence(Vec<serde_json::Value>),
    /// A single object.
    Mapping(serde_json::Value),
    /// `n` objects built from empty definitions.
    Count(u64),
}

impl TypeDefinition {
    /// Classify a raw type definition. `Err` carries the offending shape.
    pub fn classify(raw: &serde_json::Value) -> Result<Self, &'static str> {
        match raw {
            serde_json::Value::Array(items) => Ok(Self::Sequence(items.clone())),
            serde_json::Value::Object(_) => Ok(Self::Mapping(raw.clone())),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(count) => Ok(Self::Count(count)),
                None if n.is_f64() => Err("float"),
                None => Err("negative integer"),
            },
            serde_json::Value::String(_) => Err("string"),
            serde_json::Value::Bool(_) => Err("bool"),
            serde_json::Value::Null => Err("null"),
        }
    }

    /// The per-object definitions this type expands to.
    pub fn into_objects(self) -> Vec<serde_json::Value> {
        match self {
            Self::Sequence(items) => items,
            Self::Mapping(map) => vec![map],
            Self::Count(n) => (0..n)
                .map(|_| serde_json::Value::Object(serde_json::Map::new()))
                .collect(),
        }
    }
}

/// A method field pulled out of a definition, replayed once the object exists.
#[derive(Clone)]
pub struct DeferredInvocation {
    /// Field name the method was declared under.
    pub field: String,
    pub method: DeferredMethod,
    /// The field's value, unresolved. References in it resolve at replay time.
    pub argument: Node,
}

impl std::fmt::Debug for DeferredInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredInvocation")
            .field("field", &self.field)
            .field("argument", &self.argument)
            .finish()
    }
}
