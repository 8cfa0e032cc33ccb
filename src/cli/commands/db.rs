use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::AttendanceStore;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info: show_info,
        reset,
        yes,
    } = cmd
    {
        let mut store = AttendanceStore::open(&cfg.database)?;

        // A schema written by a newer build only blocks operations that
        // need the tables; --reset is the documented way out of it.
        match store.initialize() {
            Ok(()) => {}
            Err(AppError::SchemaMismatch { found, expected }) if *reset => {
                warning(format!(
                    "Schema mismatch (database v{found}, expected v{expected}); reset will rebuild it."
                ));
            }
            Err(e) => return Err(e),
        }

        if *show_info {
            store.print_info(&cfg.database)?;
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let verdict = store.integrity_check()?;
            if verdict == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, verdict);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.vacuum()?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        if *reset {
            warning("Reset drops the schema and discards every record.");
            if !yes && !confirm("Proceed with the reset?")? {
                info("Aborted; database untouched.");
                return Ok(());
            }

            store.reset()?;
            success("Database reset: schema rebuilt, all records discarded.");
        }
    }

    Ok(())
}
