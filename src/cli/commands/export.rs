use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::store::Store;
use crate::store::queries::load_attendance;

/// Export attendance history to CSV or JSON.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let format = ExportFormat::parse(format)?;
        let store = Store::open_seeded()?;
        let records = load_attendance(&store.conn)?;
        ExportLogic::export_history(&records, &format, file, *force)?;
    }
    Ok(())
}
