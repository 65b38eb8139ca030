use crate::models::update::LocationUpdate;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Lifecycle of a tracking session.
///
/// `Idle → Active ⇄ Paused → Stopped`; Stopped is terminal and Idle is
/// never re-entered for the same session. A new check-in builds a fresh
/// session object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackingStatus {
    Idle,
    Active,
    Paused,
    Stopped,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Idle => "idle",
            TrackingStatus::Active => "active",
            TrackingStatus::Paused => "paused",
            TrackingStatus::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a session, handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingSnapshot {
    pub status: TrackingStatus,
    /// Set once, on the first transition into Active.
    pub started_at: Option<DateTime<Local>>,
    /// Clamped to `[0, max_hours]`; frozen while paused or stopped.
    pub elapsed_hours: f64,
    /// Present if and only if the session is Active.
    pub next_scheduled_at: Option<DateTime<Local>>,
    pub updates: Vec<LocationUpdate>,
}
