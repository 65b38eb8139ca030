use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::queries::insert_attendance;
use crate::utils::date::today;
use chrono::{Datelike, Duration, NaiveTime, Weekday};
use rusqlite::Connection;

// (check-in, check-out, worked hours) variations cycled over past days.
const DAY_SHAPES: [(&str, &str, f64); 4] = [
    ("09:00", "17:30", 8.5),
    ("08:45", "18:15", 9.5),
    ("09:15", "17:45", 8.5),
    ("08:30", "18:00", 9.5),
];

/// Populate the store with a plausible recent history: the last ten
/// working days before today, with one absence thrown in. Purely demo
/// data; there is no backend to fetch the real thing from.
pub fn seed_demo_history(conn: &Connection) -> AppResult<()> {
    let mut day = today() - Duration::days(1);
    let mut seeded = 0usize;

    while seeded < 10 {
        if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            day = day - Duration::days(1);
            continue;
        }

        // one absence to keep the history honest
        if seeded == 6 {
            insert_attendance(
                conn,
                &AttendanceRecord {
                    id: 0,
                    date: day,
                    check_in: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
                    check_out: None,
                    hours_worked: None,
                    status: AttendanceStatus::Absent,
                    method: "none".to_string(),
                },
            )?;
        } else {
            let (check_in, check_out, hours) = DAY_SHAPES[seeded % DAY_SHAPES.len()];
            insert_attendance(
                conn,
                &AttendanceRecord {
                    id: 0,
                    date: day,
                    check_in: NaiveTime::parse_from_str(check_in, "%H:%M").unwrap(),
                    check_out: Some(NaiveTime::parse_from_str(check_out, "%H:%M").unwrap()),
                    hours_worked: Some(hours),
                    status: AttendanceStatus::Complete,
                    method: "face".to_string(),
                },
            )?;
        }

        seeded += 1;
        day = day - Duration::days(1);
    }

    Ok(())
}
