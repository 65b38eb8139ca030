use crate::cli::parser::Commands;
use crate::core::history::HistoryLogic;
use crate::errors::AppResult;
use crate::store::Store;

/// Show attendance history (demo seed + anything from this process).
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::History { period } = cmd {
        let store = Store::open_seeded()?;
        HistoryLogic::list(&store, period)?;
    }
    Ok(())
}
