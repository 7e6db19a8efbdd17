//! Tests for database migrations
//!
//! These tests verify that:
//! - Migrations apply on a fresh file
//! - Schema version is tracked correctly
//! - Reopening an up-to-date database is a no-op
//! - Status filters saved by version 1 move into `list_filters`

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::storage::database::{Database, SCHEMA_VERSION};

    fn create_test_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(&db_path).expect("Failed to create database");
        (db, temp_dir)
    }

    #[test]
    fn test_database_creation() {
        let (db, _temp) = create_test_db();
        assert_eq!(db.get_schema_version(), SCHEMA_VERSION);
    }

    fn columns(db: &Database, table: &str) -> Vec<String> {
        let mut stmt = db
            .conn()
            .prepare(&format!("PRAGMA table_info({})", table))
            .expect("Failed to prepare PRAGMA");

        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("Failed to get columns")
            .filter_map(Result::ok)
            .collect();
        columns
    }

    #[test]
    fn test_preferences_table_exists() {
        let (db, _temp) = create_test_db();
        assert_eq!(columns(&db, "user_preferences"), vec!["key", "value", "updated_at"]);
    }

    #[test]
    fn test_list_filters_table_exists() {
        let (db, _temp) = create_test_db();
        assert_eq!(
            columns(&db, "list_filters"),
            vec!["kind", "status", "region", "salesman", "updated_at"]
        );
    }

    #[test]
    fn test_version_1_status_filters_are_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("v1.db");

        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                r#"
                CREATE TABLE schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                );
                INSERT INTO schema_version (version) VALUES (1);
                CREATE TABLE user_preferences (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                INSERT INTO user_preferences VALUES ('client_status_filter', 'inactive', 10);
                INSERT INTO user_preferences VALUES ('report_status_filter', 'all', 11);
                INSERT INTO user_preferences VALUES ('language', 'ar', 12);
                "#,
            )
            .unwrap();
        }

        let db = Database::new(&path).unwrap();
        assert_eq!(db.get_schema_version(), 2);

        let mut stmt = db
            .conn()
            .prepare("SELECT kind, status FROM list_filters ORDER BY kind")
            .unwrap();
        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(
            rows,
            vec![
                ("clients".to_string(), "inactive".to_string()),
                ("reports".to_string(), "all".to_string()),
            ]
        );

        let left: Vec<String> = db
            .conn()
            .prepare("SELECT key FROM user_preferences")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(left, vec!["language"]);
    }

    #[test]
    fn test_reopen_keeps_version_and_data() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("test.db");

        {
            let db = Database::new(&path).unwrap();
            db.conn()
                .execute(
                    "INSERT INTO user_preferences (key, value, updated_at) VALUES ('k', 'v', 0)",
                    [],
                )
                .unwrap();
        }

        let db = Database::new(&path).unwrap();
        let rows: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, i64::from(SCHEMA_VERSION));

        let value: String = db
            .conn()
            .query_row("SELECT value FROM user_preferences WHERE key = 'k'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, "v");
    }
}
