//! A LIFO stack contract over a sparse index map.
//!
//! `top` is the index of the most recently pushed element, `-1` when the stack is empty.
use adt_sdk::state::ContractState;
use adt_sdk::store::LookupMap;
use adt_sdk::types::{I256, U64};
use adt_sdk::EmptyContainerError;
use borsh::{BorshDeserialize, BorshSerialize};
use log::{debug, warn};

const ITEMS_PREFIX: &[u8] = b"stack.items";
/// `top` of an empty stack.
const EMPTY_TOP: i64 = -1;

const ERR_INDEX_OVERFLOW: &str = "Stack index overflow";
const ERR_MISSING_ITEM: &str = "Stack item is missing from storage";

/// Stack header. Invariants: `count == top + 1`, so `count == 0` exactly when `top == -1`.
#[derive(BorshSerialize, BorshDeserialize)]
pub struct StackMapping {
    items: LookupMap<i64, I256>,
    top: i64,
    count: u64,
}

impl Default for StackMapping {
    fn default() -> Self {
        Self::new()
    }
}

impl StackMapping {
    pub fn new() -> Self {
        Self {
            items: LookupMap::new(ITEMS_PREFIX.to_vec()),
            top: EMPTY_TOP,
            count: 0,
        }
    }

    pub fn size(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pushes `value` on top of the stack.
    ///
    /// # Panics
    ///
    /// Panics if the top index would exceed [`i64::MAX`].
    pub fn push(&mut self, value: I256) {
        let top = self
            .top
            .checked_add(1)
            .unwrap_or_else(|| adt_sdk::panic(ERR_INDEX_OVERFLOW));
        self.items.insert(top, value);
        self.top = top;
        self.count += 1;

        debug_assert_eq!(self.count as i64, self.top + 1);
        debug!("pushed {} at index {}", value, top);
    }

    /// Returns the top element without removing it.
    pub fn peek(&self) -> Result<I256, EmptyContainerError> {
        if self.is_empty() {
            warn!("peek rejected: the stack is empty");
            return Err(EmptyContainerError);
        }
        Ok(self
            .items
            .get(&self.top)
            .unwrap_or_else(|| adt_sdk::panic(ERR_MISSING_ITEM)))
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Result<I256, EmptyContainerError> {
        if self.is_empty() {
            warn!("pop rejected: the stack is empty");
            return Err(EmptyContainerError);
        }

        let top = self.top;
        let value = self
            .items
            .remove(&top)
            .unwrap_or_else(|| adt_sdk::panic(ERR_MISSING_ITEM));
        self.top -= 1;
        self.count -= 1;

        debug_assert_eq!(self.count == 0, self.top == EMPTY_TOP);
        debug!("popped {} from index {}", value, top);
        Ok(value)
    }
}

impl ContractState for StackMapping {
    const STORAGE_KEY: &'static [u8] = b"STATE";

    fn flush(&mut self) {
        self.items.flush();
    }
}

/// Entry points of the stack contract. Every function is a separate contract call.
pub struct StackMappingContract;

#[adt_sdk::contract]
impl StackMappingContract {
    /// Creates the empty stack. Called once at deployment.
    pub fn new() {
        StackMapping::new().initialize();
    }

    pub fn size() -> U64 {
        StackMapping::load().size().into()
    }

    pub fn push(value: I256) {
        let mut state = StackMapping::load();
        state.push(value);
        state.save();
    }

    pub fn peek() -> Result<I256, EmptyContainerError> {
        StackMapping::load().peek()
    }

    pub fn pop() -> Result<I256, EmptyContainerError> {
        let mut state = StackMapping::load();
        let value = state.pop()?;
        state.save();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adt_sdk::mock::{get_mock_msgs, get_mock_output, set_mock_input, storage_snapshot};

    fn items() -> Vec<I256> {
        [11, 22, 33, 44].into_iter().map(I256::from).collect()
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = StackMapping::new();
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.top, EMPTY_TOP);
    }

    #[test]
    fn test_push_increments_size() {
        let mut stack = StackMapping::new();
        stack.push(I256::from(11));
        assert_eq!(stack.size(), 1);

        for item in items() {
            stack.push(item);
        }
        assert_eq!(stack.size(), 5);
        assert_eq!(stack.top, 4);
    }

    #[test]
    fn test_peek_returns_last_pushed() {
        let mut stack = StackMapping::new();
        stack.push(I256::from(11));
        assert_eq!(stack.peek(), Ok(I256::from(11)));

        for item in items() {
            stack.push(item);
        }
        assert_eq!(stack.peek(), Ok(I256::from(44)));
        assert_eq!(stack.peek(), Ok(I256::from(44)));
        assert_eq!(stack.size(), 5);
    }

    #[test]
    fn test_pop_returns_items_in_lifo_order() {
        let mut stack = StackMapping::new();
        for item in items() {
            stack.push(item);
        }

        for item in items().into_iter().rev() {
            assert_eq!(stack.pop(), Ok(item));
        }
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.top, EMPTY_TOP);
    }

    #[test]
    fn test_empty_stack_rejects_peek_and_pop() {
        let mut stack = StackMapping::new();

        assert_eq!(stack.peek(), Err(EmptyContainerError));
        assert_eq!(stack.pop(), Err(EmptyContainerError));
        assert_eq!(stack.size(), 0);
        assert_eq!(stack.top, EMPTY_TOP);
    }

    #[test]
    fn test_indices_are_reused_after_pop() {
        let mut stack = StackMapping::new();
        stack.push(I256::from(1));
        stack.push(I256::from(2));
        assert_eq!(stack.pop(), Ok(I256::from(2)));

        stack.push(I256::from(3));
        assert_eq!(stack.top, 1);
        assert_eq!(stack.pop(), Ok(I256::from(3)));
        assert_eq!(stack.pop(), Ok(I256::from(1)));
    }

    // Whether a removed slot is cleared or abandoned can't be observed through the stack's
    // operations, so the contract tests below only assert on returned values and sizes.

    #[test]
    fn test_contract_initial_size() {
        StackMappingContract::new();
        assert_eq!(StackMappingContract::size(), U64(0));
    }

    #[test]
    fn test_contract_lifo_across_calls() {
        StackMappingContract::new();
        for item in items() {
            StackMappingContract::push(item);
        }
        assert_eq!(StackMappingContract::size(), U64(4));

        for item in items().into_iter().rev() {
            assert_eq!(StackMappingContract::pop(), Ok(item));
        }
        assert_eq!(StackMappingContract::size(), U64(0));
    }

    #[test]
    fn test_contract_size_after_pushes_and_pops() {
        StackMappingContract::new();
        for value in 0..6 {
            StackMappingContract::push(I256::from(value));
        }
        StackMappingContract::pop().unwrap();
        StackMappingContract::pop().unwrap();

        assert_eq!(StackMappingContract::size(), U64(4));
        assert_eq!(StackMappingContract::peek(), Ok(I256::from(3)));
    }

    #[test]
    fn test_contract_round_trip() {
        StackMappingContract::new();
        StackMappingContract::push(I256::from(5));
        let before = StackMappingContract::size();

        StackMappingContract::push(I256::MAX);
        assert_eq!(StackMappingContract::pop(), Ok(I256::MAX));
        assert_eq!(StackMappingContract::size(), before);
    }

    #[test]
    fn test_contract_rejected_calls_leave_storage_untouched() {
        StackMappingContract::new();
        let before = storage_snapshot();

        assert_eq!(StackMappingContract::peek(), Err(EmptyContainerError));
        assert_eq!(StackMappingContract::pop(), Err(EmptyContainerError));

        assert_eq!(storage_snapshot(), before);
        assert_eq!(StackMappingContract::size(), U64(0));
    }

    #[test]
    fn test_entry_points_use_json_and_abort_on_empty() {
        __contract_new();

        set_mock_input(br#"{"value":"11"}"#.to_vec());
        __contract_push();
        __contract_peek();
        assert_eq!(get_mock_output(), br#""11""#.to_vec());
        __contract_pop();
        assert_eq!(get_mock_output(), br#""11""#.to_vec());
        __contract_size();
        assert_eq!(get_mock_output(), br#""0""#.to_vec());

        let before = storage_snapshot();
        let rejected = std::panic::catch_unwind(__contract_pop);
        assert!(rejected.is_err());
        assert_eq!(
            get_mock_msgs().last().map(String::as_str),
            Some("Container is empty")
        );
        assert_eq!(storage_snapshot(), before);
    }

    #[test]
    #[should_panic(expected = "The contract isn't initialized")]
    fn test_contract_requires_initialization() {
        StackMappingContract::size();
    }
}
