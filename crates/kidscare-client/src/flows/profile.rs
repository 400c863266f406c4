//! Self-service account changes from the settings screens.

use std::sync::Arc;

use tracing::info;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::UserRecord;
use kidscare_entity::user::UserUpdate;
use kidscare_session::SessionStore;

use crate::auth::AuthApi;

/// Updates the logged-in user's own account.
#[derive(Debug, Clone)]
pub struct ProfileFlow {
    auth: AuthApi,
    store: Arc<SessionStore>,
}

impl ProfileFlow {
    pub fn new(auth: AuthApi, store: Arc<SessionStore>) -> Self {
        Self { auth, store }
    }

    /// Change name and/or email.
    ///
    /// The server confirms first; the session then takes the confirmed
    /// name and email while keeping its own role, and only the user key is
    /// rewritten in durable storage.
    pub async fn update_profile(
        &self,
        name: Option<String>,
        email: Option<String>,
    ) -> AppResult<UserRecord> {
        let current = self
            .store
            .user()
            .ok_or_else(|| AppError::session("Not logged in"))?;
        if name.is_none() && email.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        let update = UserUpdate {
            name,
            email,
            ..Default::default()
        };
        let confirmed = self.auth.update_user(current.id, &update).await?;

        let user = UserRecord {
            id: current.id,
            name: confirmed.name,
            email: confirmed.email,
            role: current.role,
        };
        self.store.set_user(user.clone())?;
        self.store.persist_user()?;
        info!(user_id = user.id, "Profile updated");
        Ok(user)
    }

    /// Change the logged-in user's password.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> AppResult<String> {
        if !self.store.is_authenticated() {
            return Err(AppError::session("Not logged in"));
        }
        self.auth.change_password(old_password, new_password).await
    }
}
