use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of an object within its type's collection.
///
/// Ids are only unique per type: `person#1` and `team#1` are distinct
/// objects. Generated ids start at 1; `0` is never allocated.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// The first id handed out by an allocator.
    pub const FIRST: ObjectId = ObjectId(1);

    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id immediately after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Interpret a JSON value as an explicit id.
    ///
    /// Returns `Ok(None)` for `null` and `0`, which both mean "no explicit id".
    /// Positive integers and all-digit strings are accepted; anything else is
    /// rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Self>, TypeError> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(None),
                Some(raw) => Ok(Some(Self(raw))),
                None => Err(TypeError::InvalidId(n.to_string())),
            },
            serde_json::Value::String(s) => s.parse::<Self>().map(|id| (id.0 != 0).then_some(id)),
            other => Err(TypeError::InvalidId(other.to_string())),
        }
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidId(s.to_string()));
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| TypeError::InvalidId(s.to_string()))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
