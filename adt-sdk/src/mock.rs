//! In-process host used by unit tests.
//!
//! Compiled for the crate's own tests and when the `testing` feature is enabled. Every host
//! call of this crate is routed here instead of `adt-sys`. The state is thread local, so each
//! test (which runs on its own thread) starts with an empty storage.
use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static MOCK_DATA: RefCell<MockData> = RefCell::new(MockData::new());
}

struct MockData {
    storage: BTreeMap<Vec<u8>, Vec<u8>>,
    input: Option<Vec<u8>>,
    output: Vec<u8>,
    messages: Vec<String>,
}

impl MockData {
    fn new() -> Self {
        Self {
            storage: BTreeMap::new(),
            input: Some(Vec::new()),
            output: Vec::new(),
            messages: Vec::new(),
        }
    }
}

pub(crate) fn storage_write(key: &[u8], value: &[u8]) -> bool {
    MOCK_DATA.with(|data| {
        data.borrow_mut()
            .storage
            .insert(key.to_vec(), value.to_vec())
            .is_some()
    })
}

pub(crate) fn storage_read(key: &[u8]) -> Option<Vec<u8>> {
    MOCK_DATA.with(|data| data.borrow().storage.get(key).cloned())
}

pub(crate) fn storage_remove(key: &[u8]) -> bool {
    MOCK_DATA.with(|data| data.borrow_mut().storage.remove(key).is_some())
}

pub(crate) fn input() -> Option<Vec<u8>> {
    MOCK_DATA.with(|data| data.borrow().input.clone())
}

pub(crate) fn output(data: &[u8]) {
    MOCK_DATA.with(|data_refcell| data_refcell.borrow_mut().output = data.to_vec())
}

pub(crate) fn msg(message: &str) {
    MOCK_DATA.with(|data| data.borrow_mut().messages.push(message.to_owned()))
}

pub fn set_mock_input(data: Vec<u8>) {
    MOCK_DATA.with(|data_refcell| data_refcell.borrow_mut().input = Some(data));
}

pub fn get_mock_output() -> Vec<u8> {
    MOCK_DATA.with(|data| data.borrow().output.clone())
}

pub fn get_mock_msgs() -> Vec<String> {
    MOCK_DATA.with(|data| data.borrow().messages.clone())
}

pub fn clear_mock_io() {
    MOCK_DATA.with(|data| {
        let mut data = data.borrow_mut();
        data.input = None;
        data.output = Vec::new();
        data.messages = Vec::new();
    })
}

/// Returns a copy of every key-value pair currently in the mocked storage.
pub fn storage_snapshot() -> BTreeMap<Vec<u8>, Vec<u8>> {
    MOCK_DATA.with(|data| data.borrow().storage.clone())
}

/// Number of keys currently in the mocked storage.
pub fn storage_len() -> usize {
    MOCK_DATA.with(|data| data.borrow().storage.len())
}
