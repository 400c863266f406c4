//! # kidscare-session
//!
//! Who is logged in, where they may go, and where they get sent instead.
//!
//! - [`storage`]: durable key/value storage mirroring the session.
//! - [`store`]: the injected session store with change notifications.
//! - [`guard`]: the per-navigation render-or-redirect decision.
//! - [`routes`]: the static role-scoped route table.
//! - [`paths`]: the single owner of role-dependent base paths.
//! - [`navigator`]: history with push/replace and redirect following.

pub mod guard;
pub mod navigator;
pub mod paths;
pub mod routes;
pub mod storage;
pub mod store;

pub use guard::{GuardDecision, RouteGuard};
pub use navigator::{Navigator, Resolution};
pub use paths::{LOGIN_PATH, PathResolver, home_path};
pub use routes::{RouteMatch, RouteTable, Screen, Section};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
pub use store::{AuthSession, SessionState, SessionStore};
