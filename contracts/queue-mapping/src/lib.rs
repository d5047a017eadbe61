//! A FIFO queue contract.
//!
//! Elements live in a [`LookupMap`] keyed by monotonically increasing positions. `front` is the
//! position of the oldest element and `back` is the position the next element is written to.
//! Positions are never reused or wrapped: a dequeued slot is cleared and `front` moves past it.
use adt_sdk::state::ContractState;
use adt_sdk::store::LookupMap;
use adt_sdk::types::{I256, U64};
use adt_sdk::EmptyContainerError;
use borsh::{BorshDeserialize, BorshSerialize};
use log::{debug, warn};

const ITEMS_PREFIX: &[u8] = b"queue.items";

const ERR_POSITION_OVERFLOW: &str = "Queue position overflow";
const ERR_MISSING_ITEM: &str = "Queue item is missing from storage";

/// Queue header. Invariants: `count == back - front`, `front <= back`, and neither pointer
/// ever decreases.
#[derive(BorshSerialize, BorshDeserialize)]
pub struct QueueMapping {
    items: LookupMap<u64, I256>,
    front: u64,
    back: u64,
    count: u64,
}

impl Default for QueueMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueMapping {
    /// Creates an empty queue with both pointers at position 0.
    pub fn new() -> Self {
        Self {
            items: LookupMap::new(ITEMS_PREFIX.to_vec()),
            front: 0,
            back: 0,
            count: 0,
        }
    }

    pub fn size(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends `value` at the back of the queue.
    ///
    /// # Panics
    ///
    /// Panics if the back position would exceed [`u64::MAX`].
    pub fn enqueue(&mut self, value: I256) {
        let position = self.back;
        self.back = self
            .back
            .checked_add(1)
            .unwrap_or_else(|| adt_sdk::panic(ERR_POSITION_OVERFLOW));
        self.items.insert(position, value);
        self.count += 1;

        debug_assert_eq!(self.count, self.back - self.front);
        debug!("enqueued {} at position {}", value, position);
    }

    /// Returns the oldest element without removing it.
    pub fn view_front(&self) -> Result<I256, EmptyContainerError> {
        self.ensure_not_empty("view_front")?;
        Ok(self.item_at(self.front))
    }

    /// Returns the newest element without removing it.
    pub fn view_back(&self) -> Result<I256, EmptyContainerError> {
        self.ensure_not_empty("view_back")?;
        Ok(self.item_at(self.back - 1))
    }

    /// Removes and returns the oldest element.
    pub fn dequeue(&mut self) -> Result<I256, EmptyContainerError> {
        self.ensure_not_empty("dequeue")?;

        let position = self.front;
        let value = self
            .items
            .remove(&position)
            .unwrap_or_else(|| adt_sdk::panic(ERR_MISSING_ITEM));
        self.front += 1;
        self.count -= 1;

        debug_assert_eq!(self.count, self.back - self.front);
        debug!("dequeued {} from position {}", value, position);
        Ok(value)
    }

    fn ensure_not_empty(&self, operation: &str) -> Result<(), EmptyContainerError> {
        if self.is_empty() {
            warn!("{} rejected: the queue is empty", operation);
            return Err(EmptyContainerError);
        }
        Ok(())
    }

    fn item_at(&self, position: u64) -> I256 {
        self.items
            .get(&position)
            .unwrap_or_else(|| adt_sdk::panic(ERR_MISSING_ITEM))
    }
}

impl ContractState for QueueMapping {
    const STORAGE_KEY: &'static [u8] = b"STATE";

    fn flush(&mut self) {
        self.items.flush();
    }
}

/// Entry points of the queue contract. Every function is a separate contract call.
pub struct QueueMappingContract;

#[adt_sdk::contract]
impl QueueMappingContract {
    /// Creates the empty queue. Called once at deployment.
    pub fn new() {
        QueueMapping::new().initialize();
    }

    pub fn size() -> U64 {
        QueueMapping::load().size().into()
    }

    pub fn enqueue(value: I256) {
        let mut state = QueueMapping::load();
        state.enqueue(value);
        state.save();
    }

    pub fn view_front() -> Result<I256, EmptyContainerError> {
        QueueMapping::load().view_front()
    }

    pub fn view_back() -> Result<I256, EmptyContainerError> {
        QueueMapping::load().view_back()
    }

    pub fn dequeue() -> Result<I256, EmptyContainerError> {
        let mut state = QueueMapping::load();
        let value = state.dequeue()?;
        state.save();
        Ok(value)
    }
}
