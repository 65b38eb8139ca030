//! Elapsed-time and cadence arithmetic for tracking sessions.
//!
//! Kept separate from the session manager so the clamp and ceiling rules
//! have one home: elapsed time always counts from `started_at`, pauses
//! included, and is capped at the session ceiling.

use tokio::time::Instant;

const SECS_PER_HOUR: f64 = 3600.0;

/// Hours since `started_at`, clamped to `[0, max_hours]`.
pub fn elapsed_hours(started_at: Instant, now: Instant, max_hours: f64) -> f64 {
    let hours = now.duration_since(started_at).as_secs_f64() / SECS_PER_HOUR;
    hours.clamp(0.0, max_hours)
}

/// True once the session has run for at least `max_hours` of wall time,
/// pause history notwithstanding.
pub fn ceiling_reached(started_at: Instant, now: Instant, max_hours: f64) -> bool {
    now.duration_since(started_at).as_secs_f64() >= max_hours * SECS_PER_HOUR
}
