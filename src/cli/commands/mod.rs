pub mod clear;
pub mod dates;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod record;
pub mod search;
pub mod stats;

use crate::config::Config;
use crate::errors::AppResult;
use crate::store::AttendanceStore;

/// Open the configured database and bring it to the ready state.
/// Every subcommand goes through here, so a fresh database gets its
/// schema on first use without a separate `init`.
pub(crate) fn open_ready_store(cfg: &Config) -> AppResult<AttendanceStore> {
    let mut store = AttendanceStore::open(&cfg.database)?;
    store.initialize()?;
    Ok(store)
}
