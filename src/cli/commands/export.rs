use crate::cli::commands::open_ready_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = open_ready_store(cfg)?;
        ExportLogic::export(&store, format.clone(), file, range, *force)?;
    }
    Ok(())
}
