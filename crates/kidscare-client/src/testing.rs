//! Fake API server and fixtures for client tests.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use kidscare_core::config::ApiConfig;
use kidscare_core::types::{Role, UserRecord};
use kidscare_session::{DurableStorage, MemoryStorage, SessionStore};

use crate::http::ApiClient;

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{addr}")
}

/// A client over a fresh, empty in-memory session.
pub fn client(base_url: &str) -> ApiClient {
    client_with_storage(base_url, Arc::new(MemoryStorage::new()))
}

/// A client whose session is hydrated from `storage`.
pub fn client_with_storage(base_url: &str, storage: Arc<dyn DurableStorage>) -> ApiClient {
    let store = Arc::new(SessionStore::hydrate(storage));
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    ApiClient::new(&config, store).expect("Failed to build client")
}

/// A user fixture with the given role.
pub fn user(role: Role) -> UserRecord {
    UserRecord {
        id: 7,
        name: "Jamie".to_string(),
        email: "jamie@kids.test".to_string(),
        role,
    }
}
