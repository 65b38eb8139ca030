//! Geolocation capability: the single-fix provider contract consumed by
//! the tracking session manager and the check-in flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

pub mod simulated;

pub use simulated::SimulatedDevice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Options for a single position request.
#[derive(Debug, Clone)]
pub struct FixRequest {
    pub high_accuracy: bool,
    /// Upper bound on how long the device may spend acquiring the fix.
    pub timeout: Duration,
}

/// A single instantaneous position reading.
#[derive(Debug, Clone)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub accuracy: f64,
    /// Device timestamp of the reading.
    pub measured_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    #[error("position fix timed out")]
    Timeout,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Contract for the device positioning service.
///
/// Implementations must be cheap to call repeatedly; the session manager
/// issues one request per capture tick and never runs two concurrently.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_fix(&self, request: &FixRequest) -> Result<Fix, FixError>;
}
