#![no_std]

// Registers hold host data until the contract copies it into its own memory.
type RegisterId = u64;
// An address in the contract's linear memory.
type MemoryAddress = u64;
type ReturnCode = u64;

extern "C" {
    /*
     * Register API
     */
    /// Copies the content of `register_id` to `result_addr`.
    pub fn read_register(register_id: RegisterId, result_addr: MemoryAddress);
    /// Returns the length of `register_id`, or `u64::MAX` if the register is unused.
    pub fn register_len(register_id: RegisterId) -> u64;

    /*
     * Storage API
     */
    /// 1 if an existing value was replaced, 0 otherwise.
    pub fn storage_write(
        key_addr: MemoryAddress,
        key_len: u64,
        value_addr: MemoryAddress,
        value_len: u64,
        evicted_register_id: RegisterId,
    ) -> ReturnCode;
    /// 1 if the key was found and its value placed in `register_id`, 0 otherwise.
    pub fn storage_read(
        key_addr: MemoryAddress,
        key_len: u64,
        register_id: RegisterId,
    ) -> ReturnCode;
    /// 1 if the key existed and was removed, 0 otherwise.
    pub fn storage_remove(
        key_addr: MemoryAddress,
        key_len: u64,
        register_id: RegisterId,
    ) -> ReturnCode;

    /*
     * Call context API
     */
    pub fn input(result_register_id: RegisterId);
    pub fn output(output_addr: MemoryAddress, output_len: u64);

    /*
     * Misc API
     */
    /// Aborts the call. The host discards every storage change made by the call.
    pub fn panic() -> !;
    pub fn panic_msg(msg_addr: MemoryAddress, msg_len: u64) -> !;
    pub fn msg(addr: MemoryAddress, len: u64);
}
