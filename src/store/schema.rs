use crate::errors::AppResult;
use rusqlite::Connection;

/// Create the in-memory schema. There is no migration engine here: the
/// store never outlives the process, so the schema is always current.
pub fn init_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE attendance (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            check_in     TEXT NOT NULL,
            check_out    TEXT,
            hours_worked REAL,
            status       TEXT NOT NULL,
            method       TEXT NOT NULL DEFAULT 'face'
         );

         CREATE TABLE session_updates (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            latitude    REAL NOT NULL,
            longitude   REAL NOT NULL,
            accuracy    REAL NOT NULL,
            measured_at TEXT NOT NULL,
            captured_at TEXT NOT NULL
         );

         CREATE TABLE log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT NOT NULL DEFAULT '',
            message   TEXT NOT NULL DEFAULT ''
         );",
    )?;
    Ok(())
}
