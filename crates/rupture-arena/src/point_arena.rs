//! Keyed per-point state storage.
//!
//! [`PointArena`] stores one `T` per interface grid point. Entries are
//! kept in insertion order in an `IndexMap`, so lookups by key are O(1)
//! and slot handles are stable dense indices.

use indexmap::IndexMap;
use rupture_core::PointKey;

use crate::error::ArenaError;
use crate::handle::PointHandle;

/// Per-point storage keyed by [`PointKey`].
#[derive(Clone, Debug)]
pub struct PointArena<T> {
    entries: IndexMap<PointKey, T>,
    capacity: Option<usize>,
}

impl<T> Default for PointArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PointArena<T> {
    /// Create an empty, unbounded arena.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: None,
        }
    }

    /// Create an empty arena that holds at most `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Build an arena from `keys`, computing each value with `init`.
    ///
    /// `init` receives the slot the value will occupy.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::DuplicateKey`] if a key repeats.
    pub fn from_keys<I, F>(keys: I, mut init: F) -> Result<Self, ArenaError>
    where
        I: IntoIterator<Item = PointKey>,
        F: FnMut(PointHandle, PointKey) -> T,
    {
        let mut arena = Self::new();
        for key in keys {
            let slot = PointHandle::from_index(arena.len());
            arena.insert(key, init(slot, key))?;
        }
        Ok(arena)
    }

    /// Insert the value for a new point.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::DuplicateKey`] if `key` is already present,
    /// or [`ArenaError::CapacityExceeded`] if the arena is full.
    pub fn insert(&mut self, key: PointKey, value: T) -> Result<PointHandle, ArenaError> {
        if self.entries.contains_key(&key) {
            return Err(ArenaError::DuplicateKey { key });
        }
        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity {
                return Err(ArenaError::CapacityExceeded {
                    requested: self.entries.len() + 1,
                    capacity,
                });
            }
        }
        let (index, _) = self.entries.insert_full(key, value);
        Ok(PointHandle::from_index(index))
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the arena has no points.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot of `key`, if present.
    pub fn handle(&self, key: &PointKey) -> Option<PointHandle> {
        self.entries.get_index_of(key).map(PointHandle::from_index)
    }

    /// Key stored at `handle`.
    pub fn key(&self, handle: PointHandle) -> Option<PointKey> {
        self.entries.get_index(handle.index()).map(|(k, _)| *k)
    }

    /// Value at `handle`.
    pub fn get(&self, handle: PointHandle) -> Option<&T> {
        self.entries.get_index(handle.index()).map(|(_, v)| v)
    }

    /// Mutable value at `handle`.
    pub fn get_mut(&mut self, handle: PointHandle) -> Option<&mut T> {
        self.entries.get_index_mut(handle.index()).map(|(_, v)| v)
    }

    /// Value for `key`.
    pub fn get_by_key(&self, key: &PointKey) -> Option<&T> {
        self.entries.get(key)
    }

    /// Mutable value for `key`.
    pub fn get_by_key_mut(&mut self, key: &PointKey) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    /// Iterate `(slot, key, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointHandle, PointKey, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (k, v))| (PointHandle::from_index(i), *k, v))
    }

    /// Iterate `(slot, key, value)` mutably in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PointHandle, PointKey, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .map(|(i, (k, v))| (PointHandle::from_index(i), *k, v))
    }

    /// Iterate values mutably in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rupture_core::BlockId;

    fn key(i: u32, j: u32) -> PointKey {
        PointKey::new(BlockId(0), i, j)
    }

    #[test]
    fn insert_assigns_dense_slots() {
        let mut arena = PointArena::new();
        let a = arena.insert(key(0, 0), 1.0).unwrap();
        let b = arena.insert(key(1, 0), 2.0).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.get(b), Some(&2.0));
        assert_eq!(arena.key(a), Some(key(0, 0)));
        assert_eq!(arena.handle(&key(1, 0)), Some(b));
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut arena = PointArena::new();
        arena.insert(key(3, 4), ()).unwrap();
        assert_eq!(
            arena.insert(key(3, 4), ()),
            Err(ArenaError::DuplicateKey { key: key(3, 4) })
        );
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut arena = PointArena::with_capacity(1);
        arena.insert(key(0, 0), 0u8).unwrap();
        assert!(matches!(
            arena.insert(key(0, 1), 0u8),
            Err(ArenaError::CapacityExceeded { capacity: 1, .. })
        ));
    }

    #[test]
    fn from_keys_passes_slot_to_init() {
        let arena =
            PointArena::from_keys([key(5, 0), key(6, 0)], |slot, _| slot.index() * 10).unwrap();
        let values: Vec<_> = arena.iter().map(|(_, _, v)| *v).collect();
        assert_eq!(values, vec![0, 10]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut arena = PointArena::from_keys([key(0, 0), key(0, 1)], |_, _| 1.0).unwrap();
        for (_, _, v) in arena.iter_mut() {
            *v *= 3.0;
        }
        assert!(arena.iter().all(|(_, _, v)| *v == 3.0));
    }

    proptest! {
        #[test]
        fn slots_follow_insertion_order(n in 1usize..64) {
            let keys: Vec<_> = (0..n as u32).map(|i| key(i, i + 1)).collect();
            let arena = PointArena::from_keys(keys.clone(), |_, k| k).unwrap();
            for (slot, k, v) in arena.iter() {
                prop_assert_eq!(keys[slot.index()], k);
                prop_assert_eq!(*v, k);
                prop_assert_eq!(arena.handle(&k), Some(slot));
            }
        }
    }
}
