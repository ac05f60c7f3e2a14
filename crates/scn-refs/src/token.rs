use std::fmt;

use scn_types::ObjectId;

/// A decomposed reference: which object, and which attributes to chase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceToken {
    /// Type of the referenced object, as written (may be plural).
    pub type_name: String,
    /// Id of the referenced object within its type.
    pub id: ObjectId,
    /// Attribute names to read, in order, starting from the object.
    pub attrs: Vec<String>,
}

impl ReferenceToken {
    pub fn new(type_name: impl Into<String>, id: ObjectId) -> Self {
        Self {
            type_name: type_name.into(),
            id,
            attrs: Vec::new(),
        }
    }

    /// Append an attribute to the chain.
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(name.into());
        self
    }

    /// Returns `true` if the token names the object itself.
    pub fn is_bare(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.id)?;
        for attr in &self.attrs {
            write!(f, ".{attr}")?;
        }
        Ok(())
    }
}
