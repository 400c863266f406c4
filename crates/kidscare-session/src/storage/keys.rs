//! Durable storage key names.
//!
//! Centralising key names keeps the on-disk layout in one place.

/// Raw bearer token.
pub const ACCESS_TOKEN: &str = "access_token";

/// JSON-serialized [`UserRecord`](kidscare_core::types::UserRecord).
pub const USER: &str = "user";

/// `"light"` or `"dark"`; unrelated to auth but colocated.
pub const THEME: &str = "theme";
