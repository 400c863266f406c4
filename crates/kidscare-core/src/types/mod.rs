//! Core type definitions shared across the KidsCare workspace.

pub mod role;
pub mod theme;
pub mod user;

pub use role::{Role, RoleSet};
pub use theme::Theme;
pub use user::UserRecord;
