//! User preferences storage
//!
//! Free-form key/value pairs live in `user_preferences`. The saved filter
//! of the client and report lists has its own row in `list_filters` so it
//! survives between runs.

use anyhow::{bail, Result};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{database::Database, unix_timestamp};
use crate::entities::EntityKind;
use crate::listing::{FilterSpec, StatusFilter};

/// User preferences manager
pub struct Preferences {
    db: Database,
}

impl Preferences {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a preference value
    pub fn get(&self, key: &str) -> Option<String> {
        self.db
            .conn()
            .query_row(
                "SELECT value FROM user_preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .ok()
    }

    /// Set a preference value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.conn().execute(
            "INSERT INTO user_preferences (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, unix_timestamp() as i64],
        )?;
        Ok(())
    }

    /// Delete a preference
    pub fn delete(&self, key: &str) -> Result<()> {
        self.db
            .conn()
            .execute("DELETE FROM user_preferences WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Saved filter for a list; defaults to active with no region or salesman
    pub fn list_filter(&self, kind: EntityKind) -> FilterSpec {
        if !kind.supports_status() {
            return FilterSpec::default();
        }
        let row = self
            .db
            .conn()
            .query_row(
                "SELECT status, region, salesman FROM list_filters WHERE kind = ?1",
                [kind.items_key()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional();

        let (status, region, salesman) = match row {
            Ok(Some(row)) => row,
            Ok(None) => return FilterSpec::default(),
            Err(e) => {
                debug!("Failed to read saved {} filter: {}", kind, e);
                return FilterSpec::default();
            }
        };

        let status = status.parse::<StatusFilter>().unwrap_or_else(|e| {
            debug!("Ignoring saved {} status: {}", kind, e);
            StatusFilter::Active
        });
        let mut filter = FilterSpec::with_status(status);
        if let Some(region) = region {
            filter = filter.region(region);
        }
        if let Some(salesman) = salesman {
            filter = filter.salesman(salesman);
        }
        filter
    }

    /// Replace the saved filter for a list
    pub fn set_list_filter(&self, kind: EntityKind, filter: &FilterSpec) -> Result<()> {
        if !kind.supports_status() {
            bail!("{} have no saved filter", kind);
        }
        self.db.conn().execute(
            "INSERT INTO list_filters (kind, status, region, salesman, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(kind) DO UPDATE SET
                status = ?2, region = ?3, salesman = ?4, updated_at = ?5",
            params![
                kind.items_key(),
                filter.status.as_str(),
                filter.region,
                filter.salesman,
                unix_timestamp() as i64
            ],
        )?;
        Ok(())
    }

    /// Forget the saved filter for a list
    pub fn reset_list_filter(&self, kind: EntityKind) -> Result<()> {
        self.db
            .conn()
            .execute("DELETE FROM list_filters WHERE kind = ?1", [kind.items_key()])?;
        Ok(())
    }

    /// Saved status filter for a list (defaults to active)
    pub fn status_filter(&self, kind: EntityKind) -> StatusFilter {
        self.list_filter(kind).status
    }

    /// Change only the status part of the saved filter
    pub fn set_status_filter(&self, kind: EntityKind, status: StatusFilter) -> Result<()> {
        let filter = FilterSpec {
            status,
            ..self.list_filter(kind)
        };
        self.set_list_filter(kind, &filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn prefs() -> (Preferences, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::new(&dir.path().join("prefs.db")).unwrap();
        (Preferences::new(db), dir)
    }

    #[test]
    fn test_get_set_delete() {
        let (prefs, _dir) = prefs();
        assert_eq!(prefs.get("language"), None);

        prefs.set("language", "ar").unwrap();
        prefs.set("language", "en").unwrap();
        assert_eq!(prefs.get("language").as_deref(), Some("en"));

        prefs.delete("language").unwrap();
        assert_eq!(prefs.get("language"), None);
    }

    #[test]
    fn test_status_filter_per_list() {
        let (prefs, _dir) = prefs();
        assert_eq!(prefs.status_filter(EntityKind::Clients), StatusFilter::Active);

        prefs
            .set_status_filter(EntityKind::Clients, StatusFilter::Inactive)
            .unwrap();
        prefs
            .set_status_filter(EntityKind::Reports, StatusFilter::All)
            .unwrap();

        assert_eq!(prefs.status_filter(EntityKind::Clients), StatusFilter::Inactive);
        assert_eq!(prefs.status_filter(EntityKind::Reports), StatusFilter::All);
        assert!(prefs
            .set_status_filter(EntityKind::Products, StatusFilter::All)
            .is_err());
    }

    #[test]
    fn test_list_filter_keeps_region_and_salesman() {
        let (prefs, _dir) = prefs();
        let saved = FilterSpec::with_status(StatusFilter::All)
            .region("North")
            .salesman("7");
        prefs.set_list_filter(EntityKind::Clients, &saved).unwrap();
        assert_eq!(prefs.list_filter(EntityKind::Clients), saved);

        // Changing the status leaves the rest of the filter alone
        prefs
            .set_status_filter(EntityKind::Clients, StatusFilter::Inactive)
            .unwrap();
        let filter = prefs.list_filter(EntityKind::Clients);
        assert_eq!(filter.status, StatusFilter::Inactive);
        assert_eq!(filter.region.as_deref(), Some("North"));
        assert_eq!(filter.salesman.as_deref(), Some("7"));

        assert_eq!(prefs.list_filter(EntityKind::Reports), FilterSpec::default());

        prefs.reset_list_filter(EntityKind::Clients).unwrap();
        assert_eq!(prefs.list_filter(EntityKind::Clients), FilterSpec::default());
    }

    #[test]
    fn test_garbage_status_reads_as_active() {
        let (prefs, _dir) = prefs();
        prefs
            .db
            .conn()
            .execute(
                "INSERT INTO list_filters (kind, status, region, updated_at)
                 VALUES ('clients', 'archived', 'South', 0)",
                [],
            )
            .unwrap();

        let filter = prefs.list_filter(EntityKind::Clients);
        assert_eq!(filter.status, StatusFilter::Active);
        assert_eq!(filter.region.as_deref(), Some("South"));
    }
}
