//! Unified application error type.
//! All modules (store, core, cli, geo) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::geo::FixError;
use crate::models::session::TrackingStatus;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store-related
    // ---------------------------
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    // ---------------------------
    // Tracking session
    // ---------------------------
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position fix failed: {0}")]
    Fix(#[from] FixError),

    #[error("Cannot {command} while tracking is {status}")]
    InvalidTransition {
        command: &'static str,
        status: TrackingStatus,
    },

    // ---------------------------
    // Check-in / auth
    // ---------------------------
    #[error("Face verification failed: {0}")]
    VerificationFailed(String),

    #[error("Invalid one-time passcode: {0}")]
    InvalidOtp(String),

    #[error("Sign-in failed: {0}")]
    AuthFailed(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
