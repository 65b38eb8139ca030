use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::errors::AppResult;
use crate::store::Store;

/// Sign in to the demo account with phone + OTP.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { phone, otp } = cmd {
        let store = Store::open()?;
        let phone = phone.clone().unwrap_or_else(|| cfg.worker_phone.clone());
        AuthLogic::verify_otp(&store.conn, cfg, &phone, otp)?;
    }
    Ok(())
}
