use crate::models::attendance::AttendanceRecord;
use crate::models::update::LocationUpdate;
use csv::Writer;
use std::path::Path;

/// Write attendance history rows to a CSV file.
pub fn write_history_csv(path: &Path, records: &[AttendanceRecord]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "date",
        "check_in",
        "check_out",
        "hours_worked",
        "status",
        "method",
    ])?;

    for record in records {
        wtr.write_record(&[
            record.date_str(),
            record.check_in_str(),
            record.check_out_str(),
            record
                .hours_worked
                .map(|h| format!("{h:.2}"))
                .unwrap_or_default(),
            record.status.label().to_string(),
            record.method.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a session's captured updates to a CSV file.
pub fn write_updates_csv(path: &Path, updates: &[LocationUpdate]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["captured_at", "measured_at", "latitude", "longitude", "accuracy"])?;

    for update in updates {
        wtr.write_record(&[
            update.captured_at.to_rfc3339(),
            update.measured_at.to_rfc3339(),
            format!("{:.6}", update.latitude),
            format!("{:.6}", update.longitude),
            format!("{:.1}", update.accuracy),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
