//! In-memory data store for the current session.
//!
//! Attendance records, captured updates and the internal operations log
//! live in a SQLite database opened in memory: nothing survives the
//! process. The client keeps no durable attendance data.

use crate::core::tracking::UpdateSink;
use crate::errors::AppResult;
use crate::models::update::LocationUpdate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod log;
pub mod queries;
pub mod schema;
pub mod seed;

pub struct Store {
    pub conn: Connection,
}

impl Store {
    /// Open a fresh, empty in-memory store.
    pub fn open() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open a store pre-populated with the demo attendance history.
    pub fn open_seeded() -> AppResult<Self> {
        let store = Self::open()?;
        seed::seed_demo_history(&store.conn)?;
        Ok(store)
    }

    /// Helper to execute a closure with a connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T>,
    {
        func(&mut self.conn)
    }
}

/// Update sink that archives captured updates into the store. The
/// archive is best-effort: a failed insert must not interrupt the
/// capture tick that produced the update.
pub struct StoreSink {
    store: Arc<Mutex<Store>>,
}

impl StoreSink {
    pub fn new(store: Arc<Mutex<Store>>) -> Self {
        Self { store }
    }
}

impl UpdateSink for StoreSink {
    fn update_captured(&self, update: &LocationUpdate) {
        if let Ok(store) = self.store.lock() {
            let _ = queries::insert_update(&store.conn, update);
        }
    }
}
