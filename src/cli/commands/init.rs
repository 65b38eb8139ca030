use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Create the configuration file with defaults.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = Config::init_all(cli.config.as_deref())?;
    success(format!("Configuration created at {}", path.display()));
    Ok(())
}
