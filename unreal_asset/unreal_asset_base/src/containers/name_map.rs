//! Asset name map

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::containers::{
    indexed_map::IndexedMap,
    shared_resource::{CyclicSharedResource, SharedResource, SharedResourceWeakRef},
};
use crate::types::fname::FName;

/// Asset name map
///
/// Holds the strings referenced by every [`FName`] in an asset, keyed by their
/// insertion-order index. Both legacy packages (per-asset name table) and Zen
/// packages (name batch / global name batch) are represented the same way once
/// decoded.
#[derive(Debug, Clone)]
pub struct NameMap {
    /// Name map lookup, from a hash of the name to its index in `name_map_index_list`
    name_map_lookup: IndexedMap<u64, i32>,
    /// Name map index list
    name_map_index_list: Vec<String>,
    /// A weak reference to self, used to construct backed `FName`s
    self_ref: SharedResourceWeakRef<NameMap>,
}

impl NameMap {
    /// Creates a new, empty `NameMap` instance
    pub fn new() -> SharedResource<NameMap> {
        SharedResource::new_cyclic(|me| NameMap {
            name_map_lookup: IndexedMap::new(),
            name_map_index_list: Vec::new(),
            self_ref: me.clone(),
        })
    }

    /// Creates a new `NameMap` instance from a decoded name batch
    pub fn from_name_batch(name_batch: &[String]) -> SharedResource<Self> {
        let mut name_map = NameMap::new();
        name_map.get_mut().name_map_index_list = Vec::with_capacity(name_batch.len());

        for name in name_batch {
            name_map.get_mut().add_name_reference(name.clone(), true);
        }

        name_map
    }

    /// Search for an existing name reference, returning its index if found
    pub fn search_name_reference(&self, name: &str) -> Option<i32> {
        let mut s = DefaultHasher::new();
        name.hash(&mut s);

        self.name_map_lookup.get_by_key(&s.finish()).copied()
    }

    /// Add a name reference, returning its index.
    ///
    /// If `force_add_duplicates` is `false` and the name is already present the
    /// existing index is returned instead of inserting a duplicate entry.
    pub fn add_name_reference(&mut self, name: String, force_add_duplicates: bool) -> i32 {
        if !force_add_duplicates {
            if let Some(existing) = self.search_name_reference(&name) {
                return existing;
            }
        }

        let mut s = DefaultHasher::new();
        name.hash(&mut s);

        let hash = s.finish();
        self.name_map_index_list.push(name);
        let index = (self.name_map_index_list.len() - 1) as i32;
        self.name_map_lookup.insert(hash, index);
        index
    }

    /// Get all names currently in this name map, in insertion order
    pub fn get_name_map_index_list(&self) -> &[String] {
        &self.name_map_index_list
    }

    /// Get a name reference by index.
    ///
    /// Negative indices and out-of-range indices are stringified verbatim,
    /// matching the engine's behavior for numbered/unresolved names.
    pub fn get_name_reference(&self, index: i32) -> String {
        if index < 0 {
            return (-index).to_string();
        }
        if index >= self.name_map_index_list.len() as i32 {
            return index.to_string();
        }
        self.name_map_index_list[index as usize].clone()
    }

    /// Get a mutable name reference by index
    pub fn get_name_reference_mut(&mut self, index: i32) -> &mut String {
        &mut self.name_map_index_list[index as usize]
    }

    /// Create an `FName` backed by this name map for a given index and instance number
    pub fn create_fname(&self, index: i32, number: i32) -> FName {
        FName::Backed {
            index,
            number,
            name_map: self.self_ref.upgrade().expect("name map dropped"),
        }
    }

    /// Add a name and create an `FName` referencing it, with instance number 0
    pub fn add_fname(&mut self, slice: &str) -> FName {
        self.add_fname_with_number(slice, 0)
    }

    /// Add a name and create an `FName` referencing it, with the given instance number
    pub fn add_fname_with_number(&mut self, slice: &str, number: i32) -> FName {
        let index = self.add_name_reference(slice.to_string(), false);
        self.create_fname(index, number)
    }

    /// Returns true if this name map has no names
    pub fn is_empty(&self) -> bool {
        self.name_map_index_list.is_empty()
    }

    /// Returns the number of names in this name map
    pub fn len(&self) -> usize {
        self.name_map_index_list.len()
    }
}

impl CyclicSharedResource<NameMap> for NameMap {
    fn on_cloned(&mut self, new_me: &SharedResourceWeakRef<NameMap>) {
        self.self_ref = new_me.clone();
    }
}

impl PartialEq for NameMap {
    fn eq(&self, other: &Self) -> bool {
        self.name_map_index_list == other.name_map_index_list
    }
}

impl Eq for NameMap {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_lookup_round_trips() {
        let mut name_map = NameMap::new();
        let idx_a = name_map.get_mut().add_name_reference("Foo".to_string(), false);
        let idx_b = name_map.get_mut().add_name_reference("Bar".to_string(), false);
        let idx_a_again = name_map.get_mut().add_name_reference("Foo".to_string(), false);

        assert_eq!(idx_a, idx_a_again);
        assert_ne!(idx_a, idx_b);
        assert_eq!(name_map.get_ref().get_name_reference(idx_a), "Foo");
        assert_eq!(name_map.get_ref().get_name_reference(idx_b), "Bar");
    }

    #[test]
    fn from_name_batch_preserves_order() {
        let batch = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        let name_map = NameMap::from_name_batch(&batch);

        assert_eq!(name_map.get_ref().get_name_map_index_list(), batch.as_slice());
    }
}
