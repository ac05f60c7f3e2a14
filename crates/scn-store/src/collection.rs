//! A single type's objects and its id counter.

use std::sync::Arc;

use indexmap::IndexMap;
use scn_types::{ObjectId, ObjectRef};

/// The outcome of inserting an object into a [`Collection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Id the new object was stored under.
    pub id: ObjectId,
    /// Set when an explicit id collided: the previous occupant's new id.
    pub relocated_to: Option<ObjectId>,
}

/// Objects of one type, keyed by id, in insertion order.
#[derive(Clone, Debug)]
pub struct Collection {
    objects: IndexMap<ObjectId, ObjectRef>,
    counter: ObjectId,
}

impl Collection {
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            counter: ObjectId::FIRST,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectRef> {
        self.objects.get(&id)
    }

    /// Current value of the id counter.
    pub fn counter(&self) -> ObjectId {
        self.counter
    }

    /// Find the next free id.
    ///
    /// Starts at the current counter and steps one at a time past occupied
    /// slots. The result becomes the new counter value, so it is returned
    /// again until something is stored under it.
    pub fn generate_id(&mut self) -> ObjectId {
        while self.objects.contains_key(&self.counter) {
            self.counter = self.counter.next();
        }
        self.counter
    }

    /// Store `object`, under `explicit` if given, otherwise under a generated id.
    ///
    /// An explicit id that is already taken moves the occupant to a generated
    /// id first; the new object then takes the requested slot.
    pub fn insert(&mut self, object: ObjectRef, explicit: Option<ObjectId>) -> Placement {
        match explicit {
            Some(id) => {
                let relocated_to = self.relocate(id);
                self.objects.insert(id, object);
                Placement { id, relocated_to }
            }
            None => {
                let id = self.generate_id();
                self.objects.insert(id, object);
                Placement {
                    id,
                    relocated_to: None,
                }
            }
        }
    }

    /// Move the object at `old` to a freshly generated id.
    ///
    /// The new id is generated while `old` is still occupied, so the occupant
    /// can never land back on its own slot. Returns `None` if `old` is empty.
    pub fn relocate(&mut self, old: ObjectId) -> Option<ObjectId> {
        if !self.objects.contains_key(&old) {
            return None;
        }
        let new_id = self.generate_id();
        let occupant = self.objects.shift_remove(&old)?;
        self.objects.insert(new_id, occupant);
        Some(new_id)
    }

    /// Id currently holding `object`, compared by identity.
    pub fn id_of(&self, object: &ObjectRef) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, stored)| Arc::ptr_eq(stored, object))
            .map(|(id, _)| *id)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// `(id, object)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectRef)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> Vec<ObjectRef> {
        self.objects.values().cloned().collect()
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}
