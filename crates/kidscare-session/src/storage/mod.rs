//! Durable client storage.
//!
//! A passive string key/value mirror of the session: written on explicit
//! persistence calls, read once when the session store hydrates.

pub mod file;
pub mod keys;
pub mod memory;

use kidscare_core::result::AppResult;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Trait for durable key/value backends.
///
/// Operations are synchronous: the console touches storage from a single
/// logical thread, between awaits, never concurrently.
pub trait DurableStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value. Returns `None` if the key is absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}
