//! User-curated favorites, independent of the active filter.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::catalog::{Property, PropertyId};

#[derive(Debug, Default)]
struct FavoriteSet {
    ids: HashSet<PropertyId>,
    // Display order; retained records stay viewable even when filters exclude them.
    entries: Vec<Property>,
}

impl FavoriteSet {
    fn contains(&self, id: &PropertyId) -> bool {
        self.ids.contains(id)
    }

    fn insert(&mut self, property: Property) {
        if !self.ids.insert(property.id.clone()) {
            self.entries.retain(|entry| entry.id != property.id);
        }
        self.entries.push(property);
    }

    fn remove(&mut self, id: &PropertyId) -> bool {
        if self.ids.remove(id) {
            self.entries.retain(|entry| &entry.id != id);
            true
        } else {
            false
        }
    }
}

/// Shared favorites handle. Clones observe the same set, so a change made through one
/// handle is visible to every other holder immediately.
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    inner: Arc<RwLock<FavoriteSet>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the listing, replacing any stored record with the same id. A refreshed
    /// record moves to the end of the display order.
    pub fn add(&self, property: Property) {
        debug!(property_id = %property.id, "favorite added");
        self.write().insert(property);
    }

    /// Removes the listing if present; returns whether anything was removed.
    pub fn remove(&self, id: &PropertyId) -> bool {
        let removed = self.write().remove(id);
        if removed {
            debug!(property_id = %id, "favorite removed");
        }
        removed
    }

    pub fn is_favorite(&self, id: &PropertyId) -> bool {
        self.read().contains(id)
    }

    /// Flips membership and returns the new state (`true` = now a favorite).
    pub fn toggle(&self, property: Property) -> bool {
        let mut set = self.write();
        if set.contains(&property.id) {
            set.remove(&property.id);
            debug!(property_id = %property.id, "favorite toggled off");
            false
        } else {
            debug!(property_id = %property.id, "favorite toggled on");
            set.insert(property);
            true
        }
    }

    /// Favorites in display order.
    pub fn list(&self) -> Vec<Property> {
        self.read().entries.clone()
    }

    pub fn ids(&self) -> Vec<PropertyId> {
        self.read()
            .entries
            .iter()
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, FavoriteSet> {
        self.inner.read().expect("favorites lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, FavoriteSet> {
        self.inner.write().expect("favorites lock poisoned")
    }
}
