//! Memoized dependency closures and dependency predicates.

use std::sync::Arc;

use dashmap::DashMap;

use crate::collection::Collection;
use crate::error::Result;
use crate::graph::{resolve, Node};

/// Caches the closure of each root, keyed by root name.
///
/// Entries are never invalidated implicitly; the package set is assumed
/// static for as long as the cache lives.
pub struct ClosureCache<T> {
    closures: DashMap<String, Arc<Collection<T>>>,
}

impl<T: Node> ClosureCache<T> {
    pub fn new() -> Self {
        Self {
            closures: DashMap::new(),
        }
    }

    /// Returns the closure of `root`, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::Error::CyclicDependency`]; failures are not cached.
    pub fn closure(&self, root: &Arc<T>) -> Result<Arc<Collection<T>>> {
        if let Some(cached) = self.closures.get(root.name()) {
            return Ok(Arc::clone(cached.value()));
        }

        let closure = Arc::new(resolve(root)?);
        self.closures
            .insert(root.name().to_string(), Arc::clone(&closure));
        Ok(closure)
    }

    /// Whether `root` depends, transitively, on every package in `targets`.
    pub fn is_dependent(&self, root: &Arc<T>, targets: &[&T]) -> Result<bool> {
        let closure = self.closure(root)?;
        Ok(targets.iter().all(|target| closure.contains(target)))
    }

    /// Whether `root` depends, transitively, on any package in `targets`.
    pub fn is_any_dependent(&self, root: &Arc<T>, targets: &[&T]) -> Result<bool> {
        let closure = self.closure(root)?;
        Ok(targets.iter().any(|target| closure.contains(target)))
    }

    pub fn invalidate(&self, name: &str) {
        self.closures.remove(name);
    }

    pub fn clear(&self) {
        self.closures.clear();
    }

    pub fn len(&self) -> usize {
        self.closures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closures.is_empty()
    }
}

impl<T: Node> Default for ClosureCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
