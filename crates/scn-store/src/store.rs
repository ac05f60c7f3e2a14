use indexmap::IndexMap;
use scn_types::{ObjectId, ObjectRef};
use tracing::{debug, warn};

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};

/// All objects of a scenario, grouped by type.
///
/// Types appear in the order their collections were created. A type exists
/// once [`ensure_type`](ObjectStore::ensure_type) or
/// [`add`](ObjectStore::add) has been called for it, even if it holds no
/// objects.
#[derive(Clone, Debug, Default)]
pub struct ObjectStore {
    collections: IndexMap<String, Collection>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection for `type_name` if none exists.
    pub fn ensure_type(&mut self, type_name: &str) -> &mut Collection {
        self.collections.entry(type_name.to_string()).or_default()
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.collections.contains_key(type_name)
    }

    /// Store an object and return the id it was stored under.
    ///
    /// With an explicit id the object always lands there; a previous
    /// occupant is relocated to a generated id first.
    pub fn add(
        &mut self,
        type_name: &str,
        object: ObjectRef,
        explicit_id: Option<ObjectId>,
    ) -> ObjectId {
        let placement = self.ensure_type(type_name).insert(object, explicit_id);
        if let Some(new_id) = placement.relocated_to {
            warn!(
                type_name,
                from = %placement.id,
                to = %new_id,
                "explicit id collision; relocated previous occupant"
            );
        }
        debug!(type_name, id = %placement.id, "object stored");
        placement.id
    }

    /// Move the object at `old_id` to a freshly generated id.
    pub fn relocate(&mut self, type_name: &str, old_id: ObjectId) -> StoreResult<ObjectId> {
        let collection = self.collection_mut(type_name)?;
        let new_id = collection.relocate(old_id).ok_or_else(|| StoreError::NotFound {
            type_name: type_name.to_string(),
            id: old_id,
        })?;
        debug!(type_name, from = %old_id, to = %new_id, "object relocated");
        Ok(new_id)
    }

    /// Next free id for `type_name`, creating its collection if needed.
    pub fn generate_id(&mut self, type_name: &str) -> ObjectId {
        self.ensure_type(type_name).generate_id()
    }

    /// Fetch one object.
    ///
    /// An unknown type is an error; an unknown id is `Ok(None)`.
    pub fn by_id(&self, type_name: &str, id: ObjectId) -> StoreResult<Option<ObjectRef>> {
        Ok(self.collection(type_name)?.get(id).cloned())
    }

    /// All objects of a type, in insertion order.
    pub fn all(&self, type_name: &str) -> StoreResult<Vec<ObjectRef>> {
        Ok(self.collection(type_name)?.objects())
    }

    /// Ids of a type, in insertion order.
    pub fn ids(&self, type_name: &str) -> StoreResult<Vec<ObjectId>> {
        Ok(self.collection(type_name)?.ids())
    }

    pub fn collection(&self, type_name: &str) -> StoreResult<&Collection> {
        self.collections
            .get(type_name)
            .ok_or_else(|| StoreError::UnknownType(type_name.to_string()))
    }

    fn collection_mut(&mut self, type_name: &str) -> StoreResult<&mut Collection> {
        self.collections
            .get_mut(type_name)
            .ok_or_else(|| StoreError::UnknownType(type_name.to_string()))
    }

    /// Type names in creation order.
    pub fn type_names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    /// Total number of objects across all types.
    pub fn len(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
