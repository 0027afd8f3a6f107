// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide entity cache.
//!
//! One cache per entity type. Entries are kept by id next to their display
//! order, and a separate "fully populated" marker records whether the whole
//! list has been fetched. The cache never talks to the network itself: the
//! services decide when to populate it and only mutate it after the server
//! has confirmed a change.
//!
//! Every change bumps a generation counter. A full-list fetch records the
//! generation it started from and only populates the cache if nothing changed
//! while it was in flight, so a confirmed mutation is never overwritten by an
//! older list.
//!
//! The lock is never held across an await point.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Anything stored in an [`EntityCache`].
pub trait Keyed {
    fn key(&self) -> u64;
}

#[derive(Debug)]
struct CacheState<T> {
    /// Ids in display order
    order: Vec<u64>,
    entries: HashMap<u64, T>,
    /// Set when the full list was fetched; `None` means Empty
    populated_at: Option<DateTime<Utc>>,
    /// Bumped on every change, including clear
    generation: u64,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            populated_at: None,
            generation: 0,
        }
    }
}

/// Ordered, id-indexed cache of one entity type.
#[derive(Debug)]
pub struct EntityCache<T> {
    state: RwLock<CacheState<T>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
        }
    }
}

impl<T: Keyed + Clone> EntityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_populated(&self) -> bool {
        self.read().populated_at.is_some()
    }

    /// When the full list was last fetched.
    pub fn populated_at(&self) -> Option<DateTime<Utc>> {
        self.read().populated_at
    }

    /// Current generation; pass it to [`EntityCache::populate_if_current`].
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// The full list in order, or `None` while the cache is Empty.
    pub fn snapshot(&self) -> Option<Vec<T>> {
        let state = self.read();
        state.populated_at?;
        Some(
            state
                .order
                .iter()
                .filter_map(|id| state.entries.get(id).cloned())
                .collect(),
        )
    }

    /// Lookup by id. Only meaningful once populated.
    pub fn get(&self, id: u64) -> Option<T> {
        self.read().entries.get(&id).cloned()
    }

    /// Replace everything with a freshly fetched list.
    pub fn populate(&self, items: Vec<T>) {
        Self::fill(&mut self.write(), items);
    }

    /// Populate with a list fetched starting at `generation`. Returns false,
    /// leaving the cache as it is, if anything changed since then.
    pub fn populate_if_current(&self, items: Vec<T>, generation: u64) -> bool {
        let mut state = self.write();
        if state.generation != generation {
            return false;
        }
        Self::fill(&mut state, items);
        true
    }

    fn fill(state: &mut CacheState<T>, items: Vec<T>) {
        state.generation += 1;
        state.order.clear();
        state.entries.clear();
        for item in items {
            let id = item.key();
            if state.entries.insert(id, item).is_none() {
                state.order.push(id);
            }
        }
        state.populated_at = Some(Utc::now());
    }

    /// Append a newly created entity. An entity whose id is already present
    /// replaces the existing entry in place instead.
    pub fn insert(&self, item: T) {
        let mut state = self.write();
        state.generation += 1;
        let id = item.key();
        if state.entries.insert(id, item).is_none() {
            state.order.push(id);
        }
    }

    /// Replace the entry with the same id, keeping its position.
    /// Returns false if no such entry exists.
    pub fn replace(&self, item: T) -> bool {
        let mut state = self.write();
        state.generation += 1;
        match state.entries.get_mut(&item.key()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with this id, keeping the order of the rest.
    pub fn remove(&self, id: u64) -> bool {
        let mut state = self.write();
        state.generation += 1;
        if state.entries.remove(&id).is_none() {
            return false;
        }
        state.order.retain(|existing| *existing != id);
        true
    }

    /// Back to Empty.
    pub fn clear(&self) {
        let mut state = self.write();
        let generation = state.generation + 1;
        *state = CacheState {
            generation,
            ..CacheState::default()
        };
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u64,
        label: &'static str,
    }

    impl Keyed for Item {
        fn key(&self) -> u64 {
            self.id
        }
    }

    fn item(id: u64, label: &'static str) -> Item {
        Item { id, label }
    }

    fn populated() -> EntityCache<Item> {
        let cache = EntityCache::new();
        cache.populate(vec![item(3, "c"), item(1, "a"), item(2, "b")]);
        cache
    }

    fn ids(cache: &EntityCache<Item>) -> Vec<u64> {
        cache
            .snapshot()
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect()
    }

    #[test]
    fn test_empty_has_no_snapshot() {
        let cache: EntityCache<Item> = EntityCache::new();
        assert!(!cache.is_populated());
        assert!(cache.snapshot().is_none());
    }

    #[test]
    fn test_populate_keeps_server_order_and_drops_duplicates() {
        let cache = EntityCache::new();
        cache.populate(vec![item(3, "c"), item(1, "a"), item(3, "c2")]);
        assert_eq!(ids(&cache), vec![3, 1]);
        assert_eq!(cache.get(3).unwrap().label, "c2");
        assert!(cache.populated_at().is_some());
    }

    #[test]
    fn test_replace_preserves_position() {
        let cache = populated();
        assert!(cache.replace(item(1, "updated")));
        let snapshot = cache.snapshot().unwrap();
        assert_eq!(snapshot[0], item(3, "c"));
        assert_eq!(snapshot[1], item(1, "updated"));
        assert_eq!(snapshot[2], item(2, "b"));
        assert!(!cache.replace(item(99, "missing")));
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let cache = populated();
        assert!(cache.remove(1));
        assert_eq!(ids(&cache), vec![3, 2]);
        assert!(!cache.remove(1));
    }

    #[test]
    fn test_insert_appends() {
        let cache = populated();
        cache.insert(item(7, "new"));
        assert_eq!(ids(&cache), vec![3, 1, 2, 7]);
    }

    #[test]
    fn test_insert_into_empty_does_not_populate() {
        let cache = EntityCache::new();
        cache.insert(item(7, "new"));
        assert!(!cache.is_populated());
        assert_eq!(cache.len(), 1);

        cache.populate(vec![item(1, "a"), item(7, "new")]);
        assert_eq!(ids(&cache), vec![1, 7]);
    }

    #[test]
    fn test_list_fetched_before_a_mutation_is_not_cached() {
        let cache = EntityCache::new();
        let started = cache.generation();

        // An add confirmed while the full list was still in flight.
        cache.insert(item(7, "new"));
        assert!(!cache.populate_if_current(vec![item(1, "a")], started));
        assert!(!cache.is_populated());

        // The next fetch sees the new entity.
        let started = cache.generation();
        assert!(cache.populate_if_current(vec![item(1, "a"), item(7, "new")], started));
        assert_eq!(ids(&cache), vec![1, 7]);
    }

    #[test]
    fn test_clear_during_fetch_blocks_populate() {
        let cache = populated();
        let started = cache.generation();
        cache.clear();
        assert!(!cache.populate_if_current(vec![item(1, "a")], started));
        assert!(!cache.is_populated());
    }

    #[test]
    fn test_clear() {
        let cache = populated();
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_populated());
    }
}
