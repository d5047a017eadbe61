pub use adt_sdk_macros::contract;
pub use adt_sys as sys;
pub use serde;
pub use serde_json;
use std::panic as std_panic;

pub mod error;
pub mod logger;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod state;
pub mod store;
pub mod types;

pub use error::EmptyContainerError;

#[cfg(not(any(test, feature = "testing")))]
const EVICTED_REGISTER: u64 = std::u64::MAX - 1;
#[cfg(not(any(test, feature = "testing")))]
const ATOMIC_OP_REGISTER: u64 = std::u64::MAX - 2;

/// Returns the size of the register. If register is not used returns `None`.
#[cfg(not(any(test, feature = "testing")))]
fn register_len(register_id: u64) -> Option<u64> {
    let len = unsafe { sys::register_len(register_id) };
    if len == std::u64::MAX {
        None
    } else {
        Some(len)
    }
}

/// Reads the content of the `register_id`. If register is not used returns `None`.
#[cfg(not(any(test, feature = "testing")))]
fn read_register(register_id: u64) -> Option<Vec<u8>> {
    let len: usize = register_len(register_id)?
        .try_into()
        .unwrap_or_else(|_| abort());

    let mut buffer = Vec::with_capacity(len);

    unsafe {
        sys::read_register(register_id, buffer.as_mut_ptr() as u64);

        buffer.set_len(len);
    }
    Some(buffer)
}

#[cfg(not(any(test, feature = "testing")))]
fn expect_register<T>(option: Option<T>) -> T {
    option.unwrap_or_else(|| abort())
}

/// Converts `PanicInfo` into a string and hands it to the host as the abort reason.
fn panic_hook_impl(info: &std_panic::PanicInfo) {
    panic(&info.to_string());
}

/// Setups panic hook to expose error info to the host.
pub fn setup_panic_hook() {
    std_panic::set_hook(Box::new(panic_hook_impl));
}

/// Aborts the current call without a custom message. The host rolls back every storage
/// change made during the call.
///
/// To include a message, use [`crate::panic`].
pub fn abort() -> ! {
    #[cfg(any(test, feature = "testing"))]
    std::panic!("Mocked abort function called!");
    #[cfg(not(any(test, feature = "testing")))]
    unsafe {
        sys::panic()
    }
}

/// Terminates the current call with the message. The host rolls back every storage change
/// made during the call.
pub fn panic(message: &str) -> ! {
    msg(message);

    #[cfg(any(test, feature = "testing"))]
    std::panic!("{}", message);
    #[cfg(not(any(test, feature = "testing")))]
    unsafe {
        sys::panic_msg(message.as_ptr() as _, message.len() as _)
    }
}

/// The input to the contract call serialized as bytes. If input is not provided returns `None`.
pub fn input() -> Option<Vec<u8>> {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::input();
    }
    #[cfg(not(any(test, feature = "testing")))]
    {
        unsafe { sys::input(ATOMIC_OP_REGISTER) };
        read_register(ATOMIC_OP_REGISTER)
    }
}

/// Writes `data` to the 'output' register
pub fn output(data: &[u8]) {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::output(data);
    }
    #[cfg(not(any(test, feature = "testing")))]
    unsafe {
        sys::output(data.as_ptr() as _, data.len() as _)
    }
}

/// Sends a diagnostic message to the host.
pub fn msg(message: &str) {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::msg(message);
    }
    #[cfg(not(any(test, feature = "testing")))]
    {
        #[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
        eprintln!("{}", message);

        unsafe { sys::msg(message.as_ptr() as _, message.len() as _) }
    }
}

/// Writes key-value into storage.
///
/// If the storage did not have this key present, `false` is returned.
///
/// If the storage did have this key present, the value is updated, and `true` is returned.
pub fn storage_write(key: &[u8], value: &[u8]) -> bool {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::storage_write(key, value);
    }
    #[cfg(not(any(test, feature = "testing")))]
    match unsafe {
        sys::storage_write(
            key.as_ptr() as _,
            key.len() as _,
            value.as_ptr() as _,
            value.len() as _,
            EVICTED_REGISTER,
        )
    } {
        0 => false,
        1 => true,
        _ => abort(),
    }
}

/// Removes the value stored under the given key.
///
/// If key-value existed returns `true`, otherwise `false`.
pub fn storage_remove(key: &[u8]) -> bool {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::storage_remove(key);
    }
    #[cfg(not(any(test, feature = "testing")))]
    match unsafe { sys::storage_remove(key.as_ptr() as _, key.len() as _, EVICTED_REGISTER) } {
        0 => false,
        1 => true,
        _ => abort(),
    }
}

/// Reads the value stored under the given key.
///
/// If the storage doesn't have the key present, returns `None`
pub fn storage_read(key: &[u8]) -> Option<Vec<u8>> {
    #[cfg(any(test, feature = "testing"))]
    {
        return mock::storage_read(key);
    }
    #[cfg(not(any(test, feature = "testing")))]
    match unsafe { sys::storage_read(key.as_ptr() as _, key.len() as _, ATOMIC_OP_REGISTER) } {
        0 => None,
        1 => Some(expect_register(read_register(ATOMIC_OP_REGISTER))),
        _ => abort(),
    }
}

/// Returns `true` if the storage has a value under the given key.
pub fn storage_has_key(key: &[u8]) -> bool {
    storage_read(key).is_some()
}
