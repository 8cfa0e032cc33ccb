use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        if !yes
            && !confirm("Delete EVERY attendance record? This cannot be undone.")?
        {
            info("Aborted; nothing deleted.");
            return Ok(());
        }

        let store = open_ready_store(cfg)?;
        let deleted = store.clear_all()?;
        success(format!("Cleared {deleted} record(s)."));
    }
    Ok(())
}
