use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::queries::SEARCH_LIMIT;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Search { query } = cmd {
        let store = open_ready_store(cfg)?;
        let hits = store.search(query)?;

        if hits.is_empty() {
            println!("No matches for '{}'.", query);
            return Ok(());
        }

        for r in &hits {
            println!(
                "#{:<5} {} | {:<12} | {:<24} | {}",
                r.id,
                r.timestamp.format("%Y-%m-%d %H:%M:%S"),
                r.student_id,
                r.full_name,
                r.status.to_db_str(),
            );
        }

        println!("\n{} match(es)", hits.len());
        if hits.len() == SEARCH_LIMIT {
            warning(format!(
                "Showing the first {SEARCH_LIMIT} matches; narrow the query to see the rest."
            ));
        }
    }
    Ok(())
}
