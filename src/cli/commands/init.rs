use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::AttendanceStore;
use crate::ui::messages::{success, warning};
use std::thread;
use std::time::Duration;

/// Bounded attempts against a transiently unavailable storage engine
/// before reporting a fatal, restart-required state.
const OPEN_ATTEMPTS: u32 = 3;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database and its schema (via the migration chain)
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Some(custom) = &cli.db {
        Config::init_all(Some(custom.clone()), cli.test)?;
    } else {
        Config::init_all(None, cli.test)?;
    }

    let mut cfg = Config::load();
    if let Some(custom) = &cli.db {
        cfg.database = custom.clone();
    }

    println!("Config file : {}", Config::config_file().display());
    println!("Database    : {}", &cfg.database);

    let mut store = open_with_backoff(&cfg.database)?;
    store.initialize()?;

    success(format!("Database initialized at {}", &cfg.database));
    Ok(())
}

fn open_with_backoff(db_path: &str) -> AppResult<AttendanceStore> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match AttendanceStore::open(db_path) {
            Ok(store) => return Ok(store),
            Err(e) if e.is_retryable() && attempt < OPEN_ATTEMPTS => {
                warning(format!(
                    "Storage unavailable (attempt {attempt}/{OPEN_ATTEMPTS}): {e}, retrying..."
                ));
                thread::sleep(Duration::from_millis(200 * attempt as u64));
            }
            Err(e) if e.is_retryable() => {
                return Err(AppError::StorageUnavailable(format!(
                    "{e} (after {OPEN_ATTEMPTS} attempts; restart required)"
                )));
            }
            Err(e) => return Err(e),
        }
    }
}
