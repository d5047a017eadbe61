//! A [`log`] backend that forwards records to the host with [`crate::msg`].
//!
//! Entry points generated by [`crate::contract`] call [`init`], so contracts can use the
//! regular `log::debug!`/`log::warn!` macros.
use log::{LevelFilter, Log, Metadata, Record};

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

struct HostLogger;

static LOGGER: HostLogger = HostLogger;

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::msg(&format!(
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

/// Installs the host logger with the default level.
pub fn init() {
    init_with_level(DEFAULT_LEVEL)
}

/// Installs the host logger and sets the maximum level. Repeated calls only change the level.
pub fn init_with_level(level: LevelFilter) {
    // Fails only if a logger is already installed, which is fine.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
