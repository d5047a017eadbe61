//! A map that stores each value under its own key in the persistent storage.
mod impls;

use std::cell::RefCell;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use super::CacheEntry;

const ERR_ELEMENT_DESERIALIZATION: &str = "Cannot deserialize element";
const ERR_ELEMENT_SERIALIZATION: &str = "Cannot serialize element";

/// A map that stores each value under `prefix ++ borsh(key)` in the persistent storage.
///
/// Only the prefix is part of the map's own Borsh encoding, so the map can live inside a
/// contract header. Values are loaded on first access and cached for the rest of the call.
/// Changes stay in the cache until:
///
/// * [`Self::flush`] method is called
/// * [`drop`] method is called
pub struct LookupMap<K, V>
where
    K: BorshSerialize + Ord,
    V: BorshSerialize + BorshDeserialize,
{
    prefix: Box<[u8]>,
    cache: RefCell<BTreeMap<K, CacheEntry<V>>>,
}

fn to_key<K: BorshSerialize>(prefix: &[u8], key: &K) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(prefix.len() + 8);
    buffer.extend_from_slice(prefix);
    key.serialize(&mut buffer)
        .unwrap_or_else(|_| crate::abort());
    buffer
}

impl<K, V> LookupMap<K, V>
where
    K: BorshSerialize + Ord,
    V: BorshSerialize + BorshDeserialize,
{
    /// Creates a new map. Uses `prefix` as a unique prefix for keys.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self {
            prefix: prefix.into_boxed_slice(),
            cache: Default::default(),
        }
    }

    /// Returns the unique byte prefix used for key generation.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    fn deserialize_element(bytes: &[u8]) -> V {
        V::try_from_slice(bytes).unwrap_or_else(|_| crate::panic(ERR_ELEMENT_DESERIALIZATION))
    }

    fn load_element(prefix: &[u8], key: &K) -> Option<V> {
        crate::storage_read(&to_key(prefix, key))
            .as_deref()
            .map(Self::deserialize_element)
    }

    /// Runs `f` on the cached slot of `key`, loading it from the storage first if needed.
    fn with_entry<R>(&self, key: K, f: impl FnOnce(&mut CacheEntry<V>) -> R) -> R {
        let mut cache = self.cache.borrow_mut();
        let entry = match cache.entry(key) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let value = Self::load_element(&self.prefix, vacant.key());
                vacant.insert(CacheEntry::loaded(value))
            }
        };
        f(entry)
    }

    /// Returns a copy of the value corresponding to the key.
    ///
    /// If the map doesn't have the key present, returns `None`
    pub fn get(&self, key: &K) -> Option<V>
    where
        K: Clone,
        V: Clone,
    {
        self.with_entry(key.clone(), |entry| entry.value().cloned())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated, and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.with_entry(key, |entry| entry.replace(Some(value)))
    }

    /// Removes a key from the map, returning the value at the key if the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Clone,
    {
        self.with_entry(key.clone(), |entry| entry.replace(None))
    }

    /// Writes the cached changes to the persistent storage.
    ///
    /// # Panic
    ///
    /// Panics if serialization fails
    pub fn flush(&mut self) {
        let mut buf = Vec::new();
        for (key, entry) in self.cache.get_mut().iter_mut() {
            if !entry.is_modified() {
                continue;
            }
            let storage_key = to_key(&self.prefix, key);
            match entry.value() {
                Some(value) => {
                    buf.clear();
                    BorshSerialize::serialize(value, &mut buf)
                        .unwrap_or_else(|_| crate::panic(ERR_ELEMENT_SERIALIZATION));
                    crate::storage_write(&storage_key, &buf);
                }
                None => {
                    crate::storage_remove(&storage_key);
                }
            }
            // Keep the value cached but don't write it again on the next flush.
            entry.mark_flushed();
        }
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

//====================================================== TESTS =================================================================
