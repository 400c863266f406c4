//! # kidscare-client
//!
//! Talks to the childcare REST API on behalf of the console.
//!
//! - [`http`]: the shared [`ApiClient`] and status-to-error mapping.
//! - [`auth`]: `/auth` endpoints.
//! - [`resource`]: the generic CRUD client used by every records screen.
//! - [`flows`]: login and profile sequences that touch the session store.
//! - [`fetch`]: the tri-state screen fetch with cancellation.
//! - [`dashboard`]: dashboard statistics.

pub mod auth;
pub mod dashboard;
pub mod fetch;
pub mod flows;
pub mod http;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::AuthApi;
pub use dashboard::DashboardStats;
pub use fetch::{FetchState, fetch};
pub use flows::{LoginFlow, ProfileFlow};
pub use http::ApiClient;
pub use resource::ResourceApi;
