//! Resource collection state: owned by one hook instance.

use crate::domain::Resource;
use serde::Serialize;

/// Local, render-ready state of one resource collection.
///
/// Items keep server order. Every mutation bumps `revision`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
    pub revision: u64,
}

impl<R: Resource> ResourceState<R> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            revision: 0,
        }
    }

    /// Replace the whole collection (e.g. from a list fetch).
    pub fn replace_all(&mut self, items: Vec<R>) {
        self.items = items;
        self.bump();
    }

    /// Append a newly created entity.
    pub fn append(&mut self, item: R) {
        self.items.push(item);
        self.bump();
    }

    /// Replace the entity with the same id, in place. Never inserts.
    ///
    /// Returns whether an entity was replaced.
    pub fn replace_one(&mut self, item: R) -> bool {
        match self.items.iter_mut().find(|i| i.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                self.bump();
                true
            }
            None => false,
        }
    }

    /// Remove the entity with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        let removed = self.items.len() != before;
        if removed {
            self.bump();
        }
        removed
    }

    pub fn get(&self, id: i64) -> Option<&R> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.bump();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<R: Resource> Default for ResourceState<R> {
    fn default() -> Self {
        Self::new()
    }
}
