use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dates = cmd {
        let store = open_ready_store(cfg)?;
        let dates = store.get_distinct_dates()?;

        if dates.is_empty() {
            println!("No records yet.");
            return Ok(());
        }

        for d in &dates {
            println!("{d}");
        }
        println!("\n{} date(s) with records", dates.len());
    }
    Ok(())
}
