use indexmap::IndexMap;
use scn_refs::ReferenceSyntax;
use scn_types::singularize;
use serde::{Deserialize, Serialize};

/// Settings for building a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Types loaded first, in this order, before the rest of the document.
    pub load_priority: Vec<String>,
    /// Definition field holding an explicit object id.
    pub id_field: String,
    /// Suffix stripped from plural type names when no handler claims them.
    pub plural_suffix: String,
    /// Irregular plurals by singular type name, e.g. `person = "people"`.
    pub plurals: IndexMap<String, String>,
    /// Delimiters for the default reference handler.
    pub references: ReferenceSyntax,
}

impl ScenarioConfig {
    /// Singular type name for a document key.
    ///
    /// A configured irregular plural wins; otherwise one `plural_suffix` is
    /// stripped.
    pub fn singular_of<'a>(&'a self, key: &'a str) -> &'a str {
        self.plurals
            .iter()
            .find(|(_, plural)| plural.as_str() == key)
            .map(|(singular, _)| singular.as_str())
            .unwrap_or_else(|| singularize(key, &self.plural_suffix))
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            load_priority: Vec::new(),
            id_field: "id".into(),
            plural_suffix: "s".into(),
            plurals: IndexMap::new(),
            references: ReferenceSyntax::default(),
        }
    }
}
