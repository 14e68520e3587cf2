//! Bidirectional handle registry
//!
//! Maps live component handles to stable ids and back. Entries are added
//! and removed explicitly by the owner on mount and unmount.

use std::collections::HashMap;
use std::hash::Hash;

/// Two-way association between component handles and ids.
#[derive(Debug, Clone)]
pub struct Registry<I, H> {
    by_handle: HashMap<H, I>,
    by_id: HashMap<I, H>,
}

impl<I, H> Default for Registry<I, H> {
    fn default() -> Self {
        Self {
            by_handle: HashMap::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<I, H> Registry<I, H>
where
    I: Clone + Eq + Hash,
    H: Clone + Eq + Hash,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `handle`, assigning one from `make_id` on first use.
    pub fn get_or_register(&mut self, handle: &H, make_id: impl FnOnce() -> I) -> I {
        if let Some(id) = self.by_handle.get(handle) {
            return id.clone();
        }
        let id = make_id();
        self.register(handle.clone(), id.clone());
        id
    }

    /// Associates `handle` with `id`, replacing any previous association of
    /// either side.
    pub fn register(&mut self, handle: H, id: I) {
        if let Some(old_id) = self.by_handle.insert(handle.clone(), id.clone()) {
            self.by_id.remove(&old_id);
        }
        if let Some(old_handle) = self.by_id.insert(id, handle.clone()) {
            if old_handle != handle {
                self.by_handle.remove(&old_handle);
            }
        }
    }

    /// Removes the association of `handle`, returning its id.
    pub fn unregister(&mut self, handle: &H) -> Option<I> {
        let id = self.by_handle.remove(handle)?;
        self.by_id.remove(&id);
        Some(id)
    }

    /// Looks up the id of a handle.
    #[must_use]
    pub fn id_of(&self, handle: &H) -> Option<&I> {
        self.by_handle.get(handle)
    }

    /// Looks up the handle registered under an id.
    #[must_use]
    pub fn handle_of(&self, id: &I) -> Option<&H> {
        self.by_id.get(id)
    }

    /// Number of registered handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    /// Returns true when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}
