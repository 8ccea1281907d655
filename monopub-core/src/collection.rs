//! Insertion-ordered, name-keyed collection of shared items.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::error::{Error, Result};

/// Anything identified by a stable, unique name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Lookup key accepted by [`Collection::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name.as_str())
    }
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// Ordered set of shared items keyed by name.
///
/// Items keep their insertion order and the name index is compacted on
/// removal, so `index_of_name` always reports the current position. Adding
/// a name that is already present is a no-op. The collection holds `Arc`s
/// and never owns the items themselves; cloning it is a shallow copy.
pub struct Collection<T> {
    items: IndexMap<String, Arc<T>, FxBuildHasher>,
}

impl<T: Named> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
        }
    }

    /// Appends `item` unless an item with the same name is already present.
    ///
    /// Returns `true` if the item was inserted.
    pub fn add(&mut self, item: Arc<T>) -> bool {
        if self.items.contains_key(item.name()) {
            return false;
        }
        self.items.insert(item.name().to_string(), item);
        true
    }

    /// Adds every item of `items` in order, skipping names already present.
    pub fn add_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Arc<T>>,
    {
        for item in items {
            self.add(item);
        }
    }

    /// Adds every item of `other` in its current order.
    pub fn extend_from(&mut self, other: &Collection<T>) {
        self.add_all(other.iter().cloned());
    }

    /// Looks an item up by name or by position.
    #[inline]
    pub fn get<'k>(&self, key: impl Into<Key<'k>>) -> Option<&Arc<T>> {
        match key.into() {
            Key::Name(name) => self.items.get(name),
            Key::Index(index) => self.items.get_index(index).map(|(_, item)| item),
        }
    }

    /// Returns the item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= self.len()`.
    pub fn get_at(&self, index: usize) -> Result<&Arc<T>> {
        self.items
            .get_index(index)
            .map(|(_, item)| item)
            .ok_or(Error::OutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// Removes the item sharing `item`'s name, shifting later items down.
    pub fn remove(&mut self, item: &T) -> Option<Arc<T>> {
        self.items.shift_remove(item.name())
    }

    /// Position of `item`, if this exact item (not just its name) is held.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let (index, _, held) = self.items.get_full(item.name())?;
        std::ptr::eq(Arc::as_ptr(held), item).then_some(index)
    }

    #[inline]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.items.get_index_of(name)
    }

    /// Identity-based membership; see [`Collection::index_of`].
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    #[inline]
    pub fn contains_name(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in their current order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Arc<T>> {
        self.items.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<Arc<T>> {
        self.items.values().cloned().collect()
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T: Named> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.keys()).finish()
    }
}

impl<T: Named> FromIterator<Arc<T>> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        let mut collection = Collection::new();
        collection.add_all(iter);
        collection
    }
}

impl<T: Named> Extend<Arc<T>> for Collection<T> {
    fn extend<I: IntoIterator<Item = Arc<T>>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Arc<T>;
    type IntoIter = indexmap::map::Values<'a, String, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = Arc<T>;
    type IntoIter = indexmap::map::IntoValues<String, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}
