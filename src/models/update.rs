use crate::geo::Fix;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One captured position fix, as recorded in the session log.
///
/// Immutable once appended. Log order is the order capture attempts were
/// initiated; `measured_at` comes from the device clock and is not
/// guaranteed to be strictly monotonic across entries.
#[derive(Debug, Clone, Serialize)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, non-negative.
    pub accuracy: f64,
    /// When the device produced the fix.
    pub measured_at: DateTime<Utc>,
    /// When the session manager recorded it (>= measured_at).
    pub captured_at: DateTime<Utc>,
}

impl LocationUpdate {
    pub fn from_fix(fix: &Fix, captured_at: DateTime<Utc>) -> Self {
        Self {
            latitude: fix.latitude,
            longitude: fix.longitude,
            accuracy: fix.accuracy,
            measured_at: fix.measured_at,
            captured_at,
        }
    }
}
