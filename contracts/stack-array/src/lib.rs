//! A LIFO stack contract over a dense persistent [`Vector`].
//!
//! Same operations as the mapping-backed stack. The top element is always the last element of
//! the vector, and the size is the vector length.
use adt_sdk::state::ContractState;
use adt_sdk::store::Vector;
use adt_sdk::types::{I256, U64};
use adt_sdk::EmptyContainerError;
use borsh::{BorshDeserialize, BorshSerialize};
use log::{debug, warn};

const ITEMS_PREFIX: &[u8] = b"array.items";

#[derive(BorshSerialize, BorshDeserialize)]
pub struct StackArray {
    items: Vector<I256>,
}

impl Default for StackArray {
    fn default() -> Self {
        Self::new()
    }
}

impl StackArray {
    pub fn new() -> Self {
        Self {
            items: Vector::new(ITEMS_PREFIX.to_vec()),
        }
    }

    pub fn size(&self) -> u64 {
        self.items.len()
    }

    pub fn push(&mut self, value: I256) {
        self.items.push(value);
        debug!("pushed {}, size is {}", value, self.items.len());
    }

    pub fn peek(&self) -> Result<I256, EmptyContainerError> {
        self.items.last().ok_or_else(|| rejected("peek"))
    }

    pub fn pop(&mut self) -> Result<I256, EmptyContainerError> {
        let value = self.items.pop().ok_or_else(|| rejected("pop"))?;
        debug!("popped {}, size is {}", value, self.items.len());
        Ok(value)
    }
}

fn rejected(operation: &str) -> EmptyContainerError {
    warn!("{} rejected: the stack is empty", operation);
    EmptyContainerError
}

impl ContractState for StackArray {
    const STORAGE_KEY: &'static [u8] = b"STATE";

    fn flush(&mut self) {
        self.items.flush();
    }
}

pub struct StackArrayContract;

#[adt_sdk::contract]
impl StackArrayContract {
    /// Creates the empty stack. Called once at deployment.
    pub fn new() {
        StackArray::new().initialize();
    }

    pub fn size() -> U64 {
        StackArray::load().size().into()
    }

    pub fn push(value: I256) {
        let mut state = StackArray::load();
        state.push(value);
        state.save();
    }

    pub fn peek() -> Result<I256, EmptyContainerError> {
        StackArray::load().peek()
    }

    pub fn pop() -> Result<I256, EmptyContainerError> {
        let mut state = StackArray::load();
        let value = state.pop()?;
        state.save();
        Ok(value)
    }
}
