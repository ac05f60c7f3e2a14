use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DocumentError, DocumentResult};
use crate::source::{Format, Source};

/// A parsed specification: type name to raw type definition, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecDocument {
    types: Map<String, Value>,
}

impl SpecDocument {
    /// Load a document from any [`Source`].
    pub fn load(source: Source) -> DocumentResult<Self> {
        match source {
            Source::Value(value) => Self::from_value(value),
            Source::Path(path) => Self::from_path(&path),
            Source::Str { text, format } => Self::parse_str(&text, format),
            Source::Reader { reader, format } => Self::from_reader(reader, format),
        }
    }

    /// Wrap an in-memory value. `null` is an empty specification.
    pub fn from_value(value: Value) -> DocumentResult<Self> {
        match value {
            Value::Object(types) => Ok(Self { types }),
            Value::Null => Ok(Self::default()),
            other => Err(DocumentError::NotAMapping(kind(&other))),
        }
    }

    pub fn from_path(path: &Path) -> DocumentResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse_str(&text, Format::from_path(path))?;
        debug!(path = %path.display(), types = doc.len(), "loaded specification");
        Ok(doc)
    }

    pub fn from_reader(mut reader: impl Read, format: Format) -> DocumentResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse_str(&text, format)
    }

    /// Parse document text. Blank text is an empty specification.
    pub fn parse_str(text: &str, format: Format) -> DocumentResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value = match format {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        Self::from_value(value)
    }

    /// Raw definition declared under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Declared type keys, in document order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// `(key, definition)` pairs, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
