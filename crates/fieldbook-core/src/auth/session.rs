//! Login session storage
//!
//! Stores the bearer token and user info in ~/.fieldbook/session.json with
//! secure permissions. The in-memory copy is shared by every clone of the
//! store, so a forced logout seen by the API client is visible everywhere.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::roles::Role;
use crate::paths;

/// The user a session belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Bearer token plus the user it was issued to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Persisted session, cheap to clone
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// None for an in-memory store that never touches disk
    path: Option<PathBuf>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Load the session from the default location
    pub fn load() -> Result<Self> {
        Self::load_from_path(&paths::session_file())
    }

    /// Load the session from a specific path (missing file means logged out)
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let session = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read session file {:?}", path))?;
            match serde_json::from_str::<Session>(&contents) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session file {:?}: {}", path, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            path: Some(path.to_path_buf()),
            current: Arc::new(RwLock::new(session)),
        })
    }

    /// Store that lives only in memory
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            path: None,
            current: Arc::new(RwLock::new(session)),
        }
    }

    /// Replace the current session and persist it
    pub fn set(&self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            Self::write_atomic(path, &session)?;
        }
        tracing::info!(
            "Session stored for {} ({})",
            session.user.username,
            session.user.role
        );
        *self.current.write() = Some(session);
        Ok(())
    }

    /// Forget the session in memory and on disk
    pub fn clear(&self) -> Result<()> {
        *self.current.write() = None;
        if let Some(path) = &self.path {
            if path.exists() {
                fs::remove_file(path)
                    .with_context(|| format!("Failed to remove session file {:?}", path))?;
            }
        }
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.read().as_ref().map(|s| s.user.role.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|s| !s.token.is_empty())
    }

    /// Write to a temp file then rename over the original; 0600 on unix
    fn write_atomic(path: &Path, session: &Session) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&temp_path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(&temp_path) {
                let mut permissions = metadata.permissions();
                permissions.set_mode(0o600);
                fs::set_permissions(&temp_path, permissions)
                    .context("Failed to set secure session file permissions")?;
            } else {
                tracing::warn!("Could not read session temp file metadata, permissions not set");
            }
        }

        fs::rename(&temp_path, path)?;
        tracing::debug!("Session saved atomically to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_session() -> Session {
        Session {
            token: "test_token".to_string(),
            user: SessionUser {
                id: Some(7),
                username: "rana".to_string(),
                role: Role::SalesSupervisor,
                email: None,
            },
        }
    }

    #[test]
    fn test_set_persists_and_reloads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");

        let store = SessionStore::load_from_path(&path).unwrap();
        assert!(!store.is_authenticated());

        store.set(create_test_session()).unwrap();
        assert!(path.exists());

        let reloaded = SessionStore::load_from_path(&path).unwrap();
        assert_eq!(reloaded.token().as_deref(), Some("test_token"));
        assert_eq!(reloaded.role(), Some(Role::SalesSupervisor));
    }

    #[test]
    fn test_clear_is_shared_between_clones() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");

        let store = SessionStore::load_from_path(&path).unwrap();
        store.set(create_test_session()).unwrap();

        let api_side = store.clone();
        api_side.clear().unwrap();

        assert!(!store.is_authenticated());
        assert!(!path.exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_logged_out() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::load_from_path(&path).unwrap();
        assert!(store.user().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        let store = SessionStore::load_from_path(&path).unwrap();
        store.set(create_test_session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
