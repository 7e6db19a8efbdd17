//! SQLite database wrapper with versioned migrations

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::info;

use crate::paths;

/// Current schema version
pub(crate) const SCHEMA_VERSION: i32 = 2;

/// SQLite database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database at the given path
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Several CLI invocations may touch the file at once
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open the database at `~/.fieldbook/fieldbook.db`
    pub fn open_default() -> Result<Self> {
        Self::new(&paths::database_file())
    }

    /// Get the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Get the current schema version from database
    pub(crate) fn get_schema_version(&self) -> i32 {
        if let Err(e) = self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        ) {
            tracing::warn!("Failed to create schema_version table: {}", e);
            return 0;
        }

        self.conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0)
    }

    fn set_schema_version(&self, version: i32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [version],
        )?;
        Ok(())
    }

    /// Run database migrations incrementally
    pub(crate) fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version();
        info!(
            "Database schema version: {} (target: {})",
            current_version, SCHEMA_VERSION
        );

        if current_version >= SCHEMA_VERSION {
            return Ok(());
        }

        // Migration 1: Preferences
        if current_version < 1 {
            info!("Running migration 1: user_preferences");
            self.conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS user_preferences (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                "#,
            )?;
            self.set_schema_version(1)?;
        }

        // Migration 2: saved list filters, one row per entity list
        if current_version < 2 {
            info!("Running migration 2: list_filters");
            self.conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS list_filters (
                    kind TEXT PRIMARY KEY,
                    status TEXT NOT NULL DEFAULT 'active',
                    region TEXT,
                    salesman TEXT,
                    updated_at INTEGER NOT NULL
                );

                INSERT OR IGNORE INTO list_filters (kind, status, updated_at)
                SELECT CASE key WHEN 'client_status_filter' THEN 'clients' ELSE 'reports' END,
                       value, updated_at
                FROM user_preferences
                WHERE key IN ('client_status_filter', 'report_status_filter');

                DELETE FROM user_preferences
                WHERE key IN ('client_status_filter', 'report_status_filter');
                "#,
            )?;
            self.set_schema_version(2)?;
        }

        Ok(())
    }
}
