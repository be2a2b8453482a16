//! Session state and stores
//!
//! The session holds the token pair and the last-known user object. Stores
//! are pluggable: in-memory for embedding and tests, file-backed for the
//! CLI. Logout clears every piece of locally held state.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use pd_core::{ApiResult, Error};
use pd_models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tokens::AuthTokens;

/// Locally held session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub tokens: AuthTokens,
    /// Last-known user object, refreshed on profile fetches
    pub user: Option<User>,
}

impl Session {
    pub fn new(tokens: AuthTokens) -> Self {
        Self { tokens, user: None }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|user| user.role)
    }
}

/// Session persistence backend
pub trait SessionStore: Send + Sync {
    /// Current session, if one is held. Corrupt persisted state reads as
    /// "no session", never as a load-time error.
    fn load(&self) -> Option<Session>;

    /// Replace the held session.
    fn store(&self, session: Session) -> ApiResult<()>;

    /// Swap in a freshly refreshed access token, keeping everything else.
    fn set_access_token(&self, access: &str) -> ApiResult<()>;

    /// Update the last-known user object.
    fn set_user(&self, user: User) -> ApiResult<()>;

    /// Discard all held session state.
    fn clear(&self) -> ApiResult<()>;

    fn access_token(&self) -> Option<String> {
        self.load().map(|session| session.tokens.access)
    }

    fn refresh_token(&self) -> Option<String> {
        self.load().map(|session| session.tokens.refresh)
    }
}

/// In-memory session store
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner.read().ok()?.clone()
    }

    fn store(&self, session: Session) -> ApiResult<()> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        *guard = Some(session);
        Ok(())
    }

    fn set_access_token(&self, access: &str) -> ApiResult<()> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        if let Some(session) = guard.as_mut() {
            session.tokens.access = access.to_owned();
        }
        Ok(())
    }

    fn set_user(&self, user: User) -> ApiResult<()> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        if let Some(session) = guard.as_mut() {
            session.user = Some(user);
        }
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self.inner.write().map_err(poisoned)?;
        *guard = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> Error {
    Error::Session("session store lock poisoned".into())
}

/// JSON-file-backed session store
///
/// The whole session is rewritten on every change; the file is small and the
/// client is single-user.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> Option<Session> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                debug!(path = %self.path.display(), %err, "ignoring unreadable session file");
                None
            }
        }
    }

    fn write(&self, session: &Session) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage)?;
            }
        }
        let json = serde_json::to_vec_pretty(session).map_err(storage)?;
        std::fs::write(&self.path, json).map_err(storage)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        self.read()
    }

    fn store(&self, session: Session) -> ApiResult<()> {
        self.write(&session)
    }

    fn set_access_token(&self, access: &str) -> ApiResult<()> {
        let Some(mut session) = self.read() else {
            return Ok(());
        };
        session.tokens.access = access.to_owned();
        self.write(&session)
    }

    fn set_user(&self, user: User) -> ApiResult<()> {
        let Some(mut session) = self.read() else {
            return Ok(());
        };
        session.user = Some(user);
        self.write(&session)
    }

    fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage(err)),
        }
    }
}

fn storage(err: impl std::fmt::Display) -> Error {
    Error::Session(err.to_string())
}

/// Shared handle used wherever a store crosses an ownership boundary
pub type SharedSessionStore = std::sync::Arc<dyn SessionStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            phone_number: "254712345678".into(),
            role: UserRole::Staff,
            is_locked: false,
            date_joined: Utc::now(),
            must_change_password: false,
        }
    }

    fn sample_session() -> Session {
        Session::new(AuthTokens::new("access-1", "refresh-1")).with_user(sample_user())
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.load().is_none());

        store.store(sample_session()).unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

        store.set_access_token("access-2").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
        // the refresh token survives an access-token swap
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[test]
    fn test_memory_store_clear_discards_everything() {
        let store = MemorySessionStore::new();
        store.store(sample_session()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));

        assert!(store.load().is_none());
        store.store(sample_session()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.tokens.access, "access-1");
        assert_eq!(loaded.user.unwrap().username, "jdoe");

        store.set_access_token("access-2").unwrap();
        assert_eq!(store.access_token().as_deref(), Some("access-2"));
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store.store(sample_session()).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().is_none());
    }
}
