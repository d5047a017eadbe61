//! A dense vector that stores its content to the persistent storage.
mod impls;

use borsh::{BorshDeserialize, BorshSerialize};

use super::LookupMap;

const ERR_INDEX_OUT_OF_BOUNDS: &str = "Index out of bounds";
const ERR_MISSING_ELEMENT: &str = "Vector element is missing from storage";

/// A dense vector that stores its content to the persistent storage.
/// Uses the following map: index -> element, with indices `0..len`.
///
/// The length is part of the vector's Borsh encoding, the elements are not. Element changes
/// are cached like in [`LookupMap`] and written on [`Self::flush`] or [`drop`].
pub struct Vector<T>
where
    T: BorshSerialize + BorshDeserialize,
{
    pub(crate) len: u64,
    pub(crate) values: LookupMap<u64, T>,
}

impl<T> Vector<T>
where
    T: BorshSerialize + BorshDeserialize,
{
    /// Creates a new vector with zero length. Uses `prefix` as a unique prefix for indices.
    pub fn new(prefix: Vec<u8>) -> Self {
        Self {
            len: 0,
            values: LookupMap::new(prefix),
        }
    }

    /// Returns the number of elements in the vector, also referred to as its 'length'.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the cached operations to the persistent storage.
    ///
    /// # Panic
    ///
    /// Panics if serialization fails
    pub fn flush(&mut self) {
        self.values.flush();
    }

    /// Overwrites the element at `index`.
    ///
    /// # Panic
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: u64, value: T) {
        if index >= self.len() {
            crate::panic(ERR_INDEX_OUT_OF_BOUNDS);
        }

        self.values.insert(index, value);
    }

    /// Appends an element to the back of a collection.
    ///
    /// # Panic
    ///
    /// Panics if the new length exceeds [`u64::MAX`].
    pub fn push(&mut self, element: T) {
        let last_idx = self.len();
        self.len = self
            .len
            .checked_add(1)
            .unwrap_or_else(|| crate::panic(ERR_INDEX_OUT_OF_BOUNDS));
        self.set(last_idx, element)
    }

    /// Removes the last element from a vector and returns it, or `None` if it is empty.
    ///
    /// The storage slot of the removed element is cleared.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let last_idx = self.len() - 1;
        let last_value = self
            .values
            .remove(&last_idx)
            .unwrap_or_else(|| crate::panic(ERR_MISSING_ELEMENT));

        self.len -= 1;

        Some(last_value)
    }
}

impl<T> Vector<T>
where
    T: BorshSerialize + BorshDeserialize + Clone,
{
    /// Returns a copy of the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: u64) -> Option<T> {
        if index >= self.len() {
            return None;
        }
        self.values.get(&index)
    }

    /// Returns a copy of the last element, or `None` if the vector is empty.
    pub fn last(&self) -> Option<T> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }
}

//====================================================== TESTS =================================================================
