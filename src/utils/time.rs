//! Time utilities: formatting elapsed hours, clock times and durations.

use chrono::{DateTime, Local};

/// Format fractional hours as "3h 24m".
pub fn hours_to_readable(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;
    format!("{}h {:02}m", h, m)
}

/// Format a local timestamp as a short clock time ("14:05").
pub fn clock_str(ts: DateTime<Local>) -> String {
    ts.format("%H:%M").to_string()
}

/// Format a local timestamp including seconds ("14:05:33").
pub fn clock_str_secs(ts: DateTime<Local>) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Format whole seconds as "1h 02m 03s" (used for short demo sessions).
pub fn secs_to_readable(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{}h {:02}m {:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_hours() {
        assert_eq!(hours_to_readable(0.0), "0h 00m");
        assert_eq!(hours_to_readable(3.5), "3h 30m");
        assert_eq!(hours_to_readable(9.0), "9h 00m");
    }

    #[test]
    fn readable_secs() {
        assert_eq!(secs_to_readable(5), "5s");
        assert_eq!(secs_to_readable(65), "1m 05s");
        assert_eq!(secs_to_readable(3723), "1h 02m 03s");
    }
}
