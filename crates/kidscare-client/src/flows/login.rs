//! Credential exchange followed by session establishment.

use std::sync::Arc;

use tracing::{info, warn};

use kidscare_core::result::AppResult;
use kidscare_session::{SessionStore, home_path};

use crate::auth::AuthApi;

/// Logs a user in.
///
/// The steps run strictly in order: exchange credentials, fetch the
/// account with the new token, establish the session, persist it (token
/// first, then user), and only then report where to navigate.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    auth: AuthApi,
    store: Arc<SessionStore>,
}

impl LoginFlow {
    pub fn new(auth: AuthApi, store: Arc<SessionStore>) -> Self {
        Self { auth, store }
    }

    /// Log in and return the home path for the user's role.
    ///
    /// If the credential exchange or the account lookup fails, the session
    /// and durable storage are left exactly as they were, including any
    /// session that was already active. If persisting fails, the login is
    /// rolled back: the session becomes anonymous and both session keys are
    /// removed, so storage never keeps a token without its user.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<&'static str> {
        let token = self.auth.login(email, password).await?;
        let user = self.auth.me_with(&token).await?;
        let role = user.role;
        let user_id = user.id;

        self.store.establish(user, token);
        if let Err(e) = self.store.persist() {
            warn!(error = %e, "Failed to persist session, rolling back login");
            self.store.logout();
            return Err(e);
        }

        info!(user_id, role = %role, "Logged in");
        Ok(home_path(Some(role)))
    }
}
