use crate::errors::AppResult;
use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::update::LocationUpdate;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, params};

pub fn insert_attendance(conn: &Connection, record: &AttendanceRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO attendance (date, check_in, check_out, hours_worked, status, method)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.date_str(),
            record.check_in_str(),
            record.check_out.map(|t| t.format("%H:%M").to_string()),
            record.hours_worked,
            record.status.code(),
            record.method,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_attendance(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, check_in, check_out, hours_worked, status, method
         FROM attendance ORDER BY date DESC, check_in DESC",
    )?;
    let rows = stmt.query_map([], row_to_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Load records restricted to the given dates (a resolved period filter).
pub fn load_attendance_for_dates(
    conn: &Connection,
    dates: &[NaiveDate],
) -> AppResult<Vec<AttendanceRecord>> {
    if dates.is_empty() {
        return Ok(Vec::new());
    }

    let date_strings: Vec<String> = dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let placeholders = vec!["?"; date_strings.len()].join(",");
    let sql = format!(
        "SELECT id, date, check_in, check_out, hours_worked, status, method
         FROM attendance WHERE date IN ({}) ORDER BY date DESC, check_in DESC",
        placeholders
    );

    let params_vec: Vec<&dyn rusqlite::ToSql> = date_strings
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params_vec), row_to_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_update(conn: &Connection, update: &LocationUpdate) -> AppResult<()> {
    conn.execute(
        "INSERT INTO session_updates (latitude, longitude, accuracy, measured_at, captured_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            update.latitude,
            update.longitude,
            update.accuracy,
            update.measured_at.to_rfc3339(),
            update.captured_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn count_updates(conn: &Connection) -> AppResult<i64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM session_updates", [], |row| row.get(0))?;
    Ok(n)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    let id: i64 = row.get(0)?;
    let date_raw: String = row.get(1)?;
    let check_in_raw: String = row.get(2)?;
    let check_out_raw: Option<String> = row.get(3)?;
    let hours_worked: Option<f64> = row.get(4)?;
    let status_raw: String = row.get(5)?;
    let method: String = row.get(6)?;

    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let check_in = NaiveTime::parse_from_str(&check_in_raw, "%H:%M").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let check_out = match check_out_raw {
        Some(raw) => Some(NaiveTime::parse_from_str(&raw, "%H:%M").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(AttendanceRecord {
        id,
        date,
        check_in,
        check_out,
        hours_worked,
        status: AttendanceStatus::from_code(&status_raw).unwrap_or(AttendanceStatus::Complete),
        method,
    })
}
