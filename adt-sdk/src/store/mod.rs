//! Collections and types used when interacting with storage.
//!
//! Unlike [`std::collections`], these collections keep only a prefix in the contract header.
//! Elements are loaded lazily, one storage key per element, and only the elements touched by
//! a call are read or written.
mod cache;
pub(crate) use self::cache::CacheEntry;

pub mod lookup_map;
pub use self::lookup_map::LookupMap;

pub mod vec;
pub use self::vec::Vector;
