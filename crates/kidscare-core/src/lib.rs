//! # kidscare-core
//!
//! Core crate for the KidsCare console. Contains the unified error system,
//! layered configuration schemas, and the closed role vocabulary together
//! with the authenticated user record.
//!
//! This crate has **no** internal dependencies on other KidsCare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
