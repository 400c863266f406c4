//! The session store: single source of truth for who is logged in.
//!
//! The store is created once at process start by [`SessionStore::hydrate`]
//! and handed to everything that needs it as an `Arc<SessionStore>`.
//! In-memory mutations never touch durable storage on their own; callers
//! persist explicitly after the server has confirmed a value.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::{Role, Theme, UserRecord};

use crate::storage::{DurableStorage, keys};

/// An authenticated user together with their bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// The server-confirmed user record.
    pub user: UserRecord,
    /// Opaque bearer token.
    pub token: String,
}

/// The session: either fully populated or entirely absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// A user and their token.
    Authenticated(AuthSession),
}

impl SessionState {
    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated(s) => Some(&s.user),
            Self::Anonymous => None,
        }
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(s) => Some(&s.token),
            Self::Anonymous => None,
        }
    }

    /// The authenticated user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Process-wide session state with change notifications.
#[derive(Debug)]
pub struct SessionStore {
    /// Durable mirror of the session.
    storage: Arc<dyn DurableStorage>,
    /// Current state; receivers observe every replacement.
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Build the store from durable storage. Runs once at process start.
    ///
    /// Never fails: a missing token, a missing user, malformed user JSON or
    /// an unreadable storage entry all yield an anonymous session.
    pub fn hydrate(storage: Arc<dyn DurableStorage>) -> Self {
        let token = read_soft(storage.as_ref(), keys::ACCESS_TOKEN).filter(|t| !t.is_empty());
        let user = read_soft(storage.as_ref(), keys::USER).and_then(|raw| {
            match serde_json::from_str::<UserRecord>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Stored user record is malformed, treating as logged out");
                    None
                }
            }
        });

        let state = match (user, token) {
            (Some(user), Some(token)) => {
                debug!(user_id = user.id, role = %user.role, "Hydrated authenticated session");
                SessionState::Authenticated(AuthSession { user, token })
            }
            (None, None) => SessionState::Anonymous,
            (user, token) => {
                warn!(
                    has_user = user.is_some(),
                    has_token = token.is_some(),
                    "Stored session is incomplete, treating as logged out"
                );
                SessionState::Anonymous
            }
        };

        let (tx, _) = watch::channel(state);
        Self { storage, state: tx }
    }

    /// A copy of the current session.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user().cloned()
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    /// The authenticated user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observe session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Replace the session with an authenticated one. Does not persist.
    pub fn establish(&self, user: UserRecord, token: String) {
        info!(user_id = user.id, role = %user.role, "Session established");
        self.state
            .send_replace(SessionState::Authenticated(AuthSession { user, token }));
    }

    /// Replace the logged-in user's record. Does not persist.
    ///
    /// The record must describe the same account with the same role; the
    /// role is never changed from the client.
    pub fn set_user(&self, user: UserRecord) -> AppResult<()> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| match state {
            SessionState::Anonymous => {
                result = Err(AppError::session("Cannot update user: not logged in"));
                false
            }
            SessionState::Authenticated(session) => {
                if session.user.id != user.id {
                    result = Err(AppError::session(format!(
                        "Cannot replace user #{} with user #{}",
                        session.user.id, user.id
                    )));
                    return false;
                }
                if session.user.role != user.role {
                    result = Err(AppError::authorization(format!(
                        "Role cannot be changed from '{}' to '{}'",
                        session.user.role, user.role
                    )));
                    return false;
                }
                let changed = session.user != user;
                session.user = user.clone();
                changed
            }
        });
        result
    }

    /// Replace the bearer token of the current session. Does not persist.
    pub fn set_token(&self, token: String) -> AppResult<()> {
        let mut result = Ok(());
        self.state.send_if_modified(|state| match state {
            SessionState::Anonymous => {
                result = Err(AppError::session("Cannot set token: not logged in"));
                false
            }
            SessionState::Authenticated(session) => {
                let changed = session.token != token;
                session.token = token.clone();
                changed
            }
        });
        result
    }

    /// Write the current session to durable storage.
    ///
    /// The token is written before the user record. An anonymous session
    /// removes both entries.
    pub fn persist(&self) -> AppResult<()> {
        match self.current() {
            SessionState::Authenticated(session) => {
                self.storage.set(keys::ACCESS_TOKEN, &session.token)?;
                let user = serde_json::to_string(&session.user)?;
                self.storage.set(keys::USER, &user)?;
                debug!(user_id = session.user.id, "Persisted session");
            }
            SessionState::Anonymous => {
                self.storage.remove(keys::ACCESS_TOKEN)?;
                self.storage.remove(keys::USER)?;
            }
        }
        Ok(())
    }

    /// Write only the user record to durable storage (profile edits).
    pub fn persist_user(&self) -> AppResult<()> {
        let user = self
            .user()
            .ok_or_else(|| AppError::session("Cannot persist user: not logged in"))?;
        self.storage.set(keys::USER, &serde_json::to_string(&user)?)
    }

    /// Log out locally. Clears memory and durable storage; cannot fail.
    pub fn logout(&self) {
        let previous = self.state.send_replace(SessionState::Anonymous);
        if let Some(user) = previous.user() {
            info!(user_id = user.id, "Logged out");
        }
        for key in [keys::ACCESS_TOKEN, keys::USER] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "Failed to remove stored session entry");
            }
        }
    }

    /// The stored theme, `dark` when unset.
    pub fn theme(&self) -> Theme {
        Theme::from_stored(read_soft(self.storage.as_ref(), keys::THEME).as_deref())
    }

    /// Store the theme.
    pub fn set_theme(&self, theme: Theme) -> AppResult<()> {
        self.storage.set(keys::THEME, theme.as_str())
    }
}

fn read_soft(storage: &dyn DurableStorage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to read durable storage entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::storage::memory::StorageWrite;

    fn staff_user() -> UserRecord {
        UserRecord {
            id: 3,
            name: "Noor".to_string(),
            email: "noor@kids.test".to_string(),
            role: Role::Staff,
        }
    }

    fn stored_user_json() -> String {
        serde_json::to_string(&staff_user()).unwrap()
    }

    #[test]
    fn test_hydrate_empty_storage_is_anonymous() {
        let store = SessionStore::hydrate(Arc::new(MemoryStorage::new()));
        assert_eq!(store.current(), SessionState::Anonymous);
    }

    #[test]
    fn test_hydrate_full_session() {
        let user = stored_user_json();
        let storage = MemoryStorage::with_entries([("access_token", "tok"), ("user", user.as_str())]);
        let store = SessionStore::hydrate(Arc::new(storage));
        assert_eq!(store.user(), Some(staff_user()));
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_hydrate_malformed_user_is_anonymous() {
        for raw in ["{not json", "null", "42", r#"{"id":1,"name":"a","email":"b","role":"Admin"}"#] {
            let storage = MemoryStorage::with_entries([("access_token", "tok"), ("user", raw)]);
            let store = SessionStore::hydrate(Arc::new(storage));
            assert!(!store.is_authenticated(), "input {raw:?} should not authenticate");
        }
    }

    #[test]
    fn test_hydrate_half_session_is_anonymous() {
        let user = stored_user_json();
        let only_user = MemoryStorage::with_entries([("user", user.as_str())]);
        assert!(!SessionStore::hydrate(Arc::new(only_user)).is_authenticated());

        let only_token = MemoryStorage::with_entries([("access_token", "tok")]);
        assert!(!SessionStore::hydrate(Arc::new(only_token)).is_authenticated());

        let empty_token = MemoryStorage::with_entries([("access_token", ""), ("user", user.as_str())]);
        assert!(!SessionStore::hydrate(Arc::new(empty_token)).is_authenticated());
    }

    #[test]
    fn test_hydrate_does_not_write() {
        let storage = Arc::new(MemoryStorage::with_entries([("user", "{broken")]));
        let _store = SessionStore::hydrate(storage.clone());
        assert!(storage.journal().is_empty());
    }

    #[test]
    fn test_establish_does_not_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::hydrate(storage.clone());
        store.establish(staff_user(), "tok".to_string());
        assert!(store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_persist_writes_token_then_user() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::hydrate(storage.clone());
        store.establish(staff_user(), "tok".to_string());
        store.persist().unwrap();

        assert_eq!(
            storage.journal(),
            vec![
                StorageWrite::Set("access_token".to_string()),
                StorageWrite::Set("user".to_string())
            ]
        );
        let rehydrated = SessionStore::hydrate(storage);
        assert_eq!(rehydrated.current(), store.current());
    }

    #[test]
    fn test_logout_clears_and_is_idempotent() {
        let user = stored_user_json();
        let storage = Arc::new(MemoryStorage::with_entries([
            ("access_token", "tok"),
            ("user", user.as_str()),
            ("theme", "light"),
        ]));
        let store = SessionStore::hydrate(storage.clone());

        store.logout();
        assert_eq!(store.current(), SessionState::Anonymous);
        assert_eq!(storage.get("access_token").unwrap(), None);
        assert_eq!(storage.get("user").unwrap(), None);

        store.logout();
        assert_eq!(store.current(), SessionState::Anonymous);
        assert_eq!(storage.len(), 1);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_set_user_requires_session_and_same_role() {
        let store = SessionStore::hydrate(Arc::new(MemoryStorage::new()));
        assert!(store.set_user(staff_user()).is_err());
        assert!(store.set_token("t".to_string()).is_err());

        store.establish(staff_user(), "tok".to_string());
        let mut renamed = staff_user();
        renamed.name = "Noor A.".to_string();
        store.set_user(renamed.clone()).unwrap();
        assert_eq!(store.user(), Some(renamed));

        let mut promoted = staff_user();
        promoted.role = Role::Admin;
        let err = store.set_user(promoted).unwrap_err();
        assert_eq!(err.kind, kidscare_core::error::ErrorKind::Authorization);
        assert_eq!(store.role(), Some(Role::Staff));
    }

    #[test]
    fn test_persist_user_only_touches_user_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::hydrate(storage.clone());
        store.establish(staff_user(), "tok".to_string());
        store.persist_user().unwrap();
        assert_eq!(storage.journal(), vec![StorageWrite::Set("user".to_string())]);
    }

    #[tokio::test]
    async fn test_subscribers_observe_login_and_logout() {
        let store = SessionStore::hydrate(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();

        store.establish(staff_user(), "tok".to_string());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated());
    }
}
