use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::errors::SitescopeError;

/// Durable keyed store holding report lifecycle state, the expected
/// sub-analysis set, and partial plus final results. The only shared
/// mutable resource in the system; all worker coordination goes through it.
pub struct ReportStore {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl ReportStore {
    pub fn new(path: &str) -> Result<Self, SitescopeError> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| SitescopeError::Store(format!("Failed to open database: {}", e)))?;

        // WAL for concurrent worker writes
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(|e| SitescopeError::Store(format!("Failed to set pragmas: {}", e)))?;

        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.initialize()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, SitescopeError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| SitescopeError::Store(format!("Failed to open in-memory db: {}", e)))?;
        let store = Self { conn: Arc::new(Mutex::new(conn)) };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<(), SitescopeError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| SitescopeError::Store(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }
}

impl Clone for ReportStore {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}
