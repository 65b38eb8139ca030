use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// View or edit the configuration file.
pub fn handle(cmd: &Commands, cli: &Cli) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| Config::config_file().to_string_lossy().to_string());

        if *edit_config && !*print_config {
            if cli.test {
                info("Editor suppressed in test mode");
            } else {
                ConfigLogic::edit(&path, editor)?;
            }
        } else {
            // default action (and --print) is to show the file
            ConfigLogic::print(&path)?;
        }
    }
    Ok(())
}
