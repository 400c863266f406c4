//! Account endpoints under `/auth`.

use tracing::info;
use validator::Validate;

use kidscare_core::error::AppError;
use kidscare_core::result::AppResult;
use kidscare_core::types::UserRecord;
use kidscare_entity::user::{
    DetailResponse, LoginRequest, PasswordChange, PasswordReset, TokenResponse, UserCreate,
    UserUpdate,
};

use crate::http::ApiClient;

/// Client for `/auth`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    /// Create the API over a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a bearer token. Sends no token itself.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<String> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        check(&request)?;
        let response: TokenResponse = self.client.post_public("/auth/login", &request).await?;
        Ok(response.access_token)
    }

    /// The account the stored token belongs to.
    pub async fn me(&self) -> AppResult<UserRecord> {
        self.client.get("/auth/me").await
    }

    /// The account `token` belongs to, before that token is stored.
    pub async fn me_with(&self, token: &str) -> AppResult<UserRecord> {
        self.client.get_with_token("/auth/me", token).await
    }

    /// Create an account.
    pub async fn register(&self, user: &UserCreate) -> AppResult<UserRecord> {
        check(user)?;
        let created: UserRecord = self.client.post("/auth/register", user).await?;
        info!(user_id = created.id, role = %created.role, "Registered user");
        Ok(created)
    }

    /// Every account (admin only).
    pub async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.client.get("/auth/").await
    }

    /// Staff-role accounts without a staff profile yet (admin only).
    pub async fn available_staff_users(&self) -> AppResult<Vec<UserRecord>> {
        self.client.get("/auth/available-staff-users").await
    }

    /// Update an account.
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> AppResult<UserRecord> {
        check(update)?;
        self.client.put(&format!("/auth/update/{id}"), update).await
    }

    /// Delete an account. Returns the server's confirmation message.
    pub async fn delete_user(&self, id: i64) -> AppResult<String> {
        let detail = self.client.delete(&format!("/auth/{id}")).await?;
        info!(user_id = id, "Deleted user");
        Ok(detail.unwrap_or_else(|| "User deleted".to_string()))
    }

    /// Change the logged-in user's own password.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> AppResult<String> {
        let request = PasswordChange {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        check(&request)?;
        let response: DetailResponse = self.client.put("/auth/change-password", &request).await?;
        Ok(response.detail)
    }

    /// Set another account's password (admin only).
    pub async fn admin_reset_password(&self, id: i64, new_password: &str) -> AppResult<String> {
        let request = PasswordReset {
            new_password: new_password.to_string(),
        };
        check(&request)?;
        let response: DetailResponse = self
            .client
            .put(&format!("/auth/admin/change-password/{id}"), &request)
            .await?;
        info!(user_id = id, "Reset user password");
        Ok(response.detail)
    }
}

fn check<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid input: {e}")))
}
