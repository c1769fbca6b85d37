pub mod migrations;
pub mod models;
pub mod queries;
pub mod seed;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use crate::seed::SeedReport;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file, apply migrations and seed the catalog.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;
        let report = seed::run(&mut conn)?;
        log_seed(&report);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Seed any catalog table that is still empty. Safe to call repeatedly.
    pub fn seed_catalog(&self) -> Result<SeedReport> {
        let report = self.with_conn_mut(seed::run)?;
        log_seed(&report);
        Ok(report)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&mut conn)
    }
}

fn log_seed(report: &SeedReport) {
    if report.is_empty() {
        info!("Catalog already seeded");
    } else {
        info!(
            "Seeded catalog: {} themes, {} voice models, {} background tracks",
            report.themes, report.voice_models, report.background_music
        );
    }
}
