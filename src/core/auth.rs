//! Mock authentication for the demo client.
//!
//! There is no identity backend: one demo account exists, and any
//! well-formed one-time passcode is accepted for it. No security claims
//! are made anywhere in this module.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::store::log::stlog;
use crate::ui::messages::success;
use regex::Regex;
use rusqlite::Connection;

pub struct AuthLogic;

impl AuthLogic {
    /// Verify a phone + OTP pair against the demo account.
    pub fn verify_otp(conn: &Connection, cfg: &Config, phone: &str, otp: &str) -> AppResult<()> {
        let otp_shape = Regex::new(r"^\d{6}$").expect("static pattern");
        if !otp_shape.is_match(otp) {
            return Err(AppError::InvalidOtp(format!(
                "'{otp}' is not a 6-digit code"
            )));
        }

        if normalize_phone(phone) != normalize_phone(&cfg.worker_phone) {
            return Err(AppError::AuthFailed(format!(
                "no account registered for {phone}"
            )));
        }

        stlog(conn, "login", phone, "OTP verified for demo account")?;
        success(format!("Signed in as {}", cfg.worker_name));
        Ok(())
    }
}

fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}
