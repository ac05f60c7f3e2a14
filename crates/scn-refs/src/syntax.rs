//! The default `$type_id.attr` reference syntax.

use serde::{Deserialize, Serialize};
use scn_types::ObjectId;

use crate::error::{RefError, Result};
use crate::token::ReferenceToken;
use crate::traits::ReferenceHandler;

/// Delimiters of the default reference syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSyntax {
    /// Leading marker that turns a string into a reference.
    pub prefix: char,
    /// Separates the type name from the id. The last occurrence wins, so type
    /// names may contain it (`$line_item_3`).
    pub id_separator: char,
    /// Separates attribute names in the chain.
    pub attr_separator: char,
}

impl Default for ReferenceSyntax {
    fn default() -> Self {
        Self {
            prefix: '$',
            id_separator: '_',
            attr_separator: '.',
        }
    }
}

/// Reference handler for `<prefix><type><id_separator><id>[<attr_separator><attr>]*`.
///
/// # Examples
///
/// ```
/// use scn_refs::{DefaultReferenceHandler, ReferenceHandler};
///
/// let handler = DefaultReferenceHandler::default();
/// let token = handler.parse("$person_1.team.name").unwrap();
/// assert_eq!(token.type_name, "person");
/// assert_eq!(token.id.get(), 1);
/// assert_eq!(token.attrs, vec!["team", "name"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefaultReferenceHandler {
    syntax: ReferenceSyntax,
}

impl DefaultReferenceHandler {
    pub fn new(syntax: ReferenceSyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &ReferenceSyntax {
        &self.syntax
    }
}

impl ReferenceHandler for DefaultReferenceHandler {
    fn is_reference(&self, value: &serde_json::Value) -> bool {
        value
            .as_str()
            .is_some_and(|s| s.starts_with(self.syntax.prefix))
    }

    fn parse(&self, reference: &str) -> Result<ReferenceToken> {
        let body = reference
            .strip_prefix(self.syntax.prefix)
            .ok_or_else(|| RefError::syntax(reference, format!("missing '{}' prefix", self.syntax.prefix)))?;

        let mut segments = body.split(self.syntax.attr_separator);
        let head = segments.next().unwrap_or_default();

        let (type_name, raw_id) = head
            .rsplit_once(self.syntax.id_separator)
            .ok_or_else(|| {
                RefError::syntax(
                    reference,
                    format!("expected <type>{}<id>", self.syntax.id_separator),
                )
            })?;
        if type_name.is_empty() {
            return Err(RefError::syntax(reference, "empty type name"));
        }

        let id: ObjectId = raw_id
            .parse()
            .map_err(|_| RefError::syntax(reference, format!("invalid id {raw_id:?}")))?;
        if id.get() == 0 {
            return Err(RefError::syntax(reference, "ids start at 1"));
        }

        let mut token = ReferenceToken::new(type_name, id);
        for attr in segments {
            if attr.is_empty() {
                return Err(RefError::syntax(reference, "empty attribute name"));
            }
            token = token.attr(attr);
        }
        Ok(token)
    }
}
