//! Durable session store.
//!
//! The authenticated session (bearer token + principal snapshot) is the only
//! client state that survives a restart. It is one JSON document, replaced
//! atomically on login via a temp-file rename and deleted on logout; there
//! are no partial updates.

use std::{fs, io, path::PathBuf};

use kopi::access::Principal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The persisted session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    /// Bearer token issued at login.
    pub access_token: String,

    /// Principal snapshot taken at login.
    pub principal: Principal,
}

/// Errors from reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Filesystem failure.
    #[error("session store i/o error: {0}")]
    Io(#[from] io::Error),

    /// The session could not be serialized.
    #[error("session store encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for the authenticated session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store over the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored session, if any.
    ///
    /// A missing file means no session. A file that cannot be parsed is
    /// treated the same way, with a diagnostic: a corrupt credential is
    /// worth a re-login, not a hard failure.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        match serde_json::from_str(&text) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    /// Atomically replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be encoded or written.
    pub fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, serde_json::to_vec_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    /// Remove the stored session. Removing an absent session is fine.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sample_session() -> StoredSession {
        StoredSession {
            access_token: "jwt".to_string(),
            principal: Principal {
                id: 1,
                name: "Root".to_string(),
                email: "root@example.com".to_string(),
                role: "ADMIN".to_string(),
                permissions: ["users:read".to_string()].into_iter().collect(),
            },
        }
    }

    #[test]
    fn load_returns_none_for_a_missing_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.load()?, None);

        Ok(())
    }

    #[test]
    fn save_then_load_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = sample_session();

        store.save(&session)?;

        assert_eq!(store.load()?, Some(session));

        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directories() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("nested/state/session.json"));

        store.save(&sample_session())?;

        assert!(store.load()?.is_some());

        Ok(())
    }

    #[test]
    fn clear_removes_the_session_and_tolerates_absence() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = SessionStore::new(dir.path().join("session.json"));

        store.save(&sample_session())?;
        store.clear()?;
        store.clear()?;

        assert_eq!(store.load()?, None);

        Ok(())
    }

    #[test]
    fn corrupt_session_files_are_discarded() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        fs::write(&path, "not json")?;

        let store = SessionStore::new(path);

        assert_eq!(store.load()?, None);

        Ok(())
    }
}
