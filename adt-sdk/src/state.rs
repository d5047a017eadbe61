//! Loading and saving the contract header.
//!
//! A contract keeps its small, fixed-size part (collection prefixes, pointers, counters) in a
//! single storage entry. Collections inside the header store their elements under their own
//! prefixes and only write them on [`ContractState::flush`].
use borsh::{BorshDeserialize, BorshSerialize};

const ERR_STATE_DESERIALIZATION: &str = "Cannot deserialize the contract state";
const ERR_STATE_SERIALIZATION: &str = "Cannot serialize the contract state";
const ERR_NOT_INITIALIZED: &str = "The contract isn't initialized";
const ERR_ALREADY_INITIALIZED: &str = "The contract has already been initialized";

/// Reads and deserializes a value stored under `key`.
///
/// # Panics
///
/// Panics if the stored bytes can't be deserialized.
pub fn read_state<T: BorshDeserialize>(key: &[u8]) -> Option<T> {
    crate::storage_read(key).map(|bytes| {
        T::try_from_slice(&bytes).unwrap_or_else(|_| crate::panic(ERR_STATE_DESERIALIZATION))
    })
}

/// Serializes `state` and writes it under `key`.
///
/// # Panics
///
/// Panics if serialization fails.
pub fn write_state<T: BorshSerialize>(key: &[u8], state: &T) {
    let bytes = state
        .try_to_vec()
        .unwrap_or_else(|_| crate::panic(ERR_STATE_SERIALIZATION));
    crate::storage_write(key, &bytes);
}

/// The persistent header of a contract.
pub trait ContractState: BorshSerialize + BorshDeserialize {
    /// Storage key of the header.
    const STORAGE_KEY: &'static [u8];

    /// Writes cached collection changes. Called by [`Self::save`] before the header.
    fn flush(&mut self) {}

    /// Loads the header written by the last successful call.
    ///
    /// # Panics
    ///
    /// Panics if the contract hasn't been initialized.
    fn load() -> Self {
        read_state(Self::STORAGE_KEY).unwrap_or_else(|| crate::panic(ERR_NOT_INITIALIZED))
    }

    /// Flushes the collections and writes the header.
    fn save(&mut self) {
        self.flush();
        write_state(Self::STORAGE_KEY, &*self);
    }

    /// Saves a freshly created header.
    ///
    /// # Panics
    ///
    /// Panics if a header already exists.
    fn initialize(mut self) {
        if crate::storage_has_key(Self::STORAGE_KEY) {
            crate::panic(ERR_ALREADY_INITIALIZED);
        }
        self.save();
    }
}
