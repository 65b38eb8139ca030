use crate::models::attendance::AttendanceRecord;
use crate::models::update::LocationUpdate;
use std::path::Path;

/// Write attendance history as pretty-printed JSON.
pub fn write_history_json(path: &Path, records: &[AttendanceRecord]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)
}

/// Write a session's captured updates as pretty-printed JSON.
pub fn write_updates_json(path: &Path, updates: &[LocationUpdate]) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(updates)?;
    std::fs::write(path, json)
}
