//! Multi-step sequences that combine API calls with session updates.

pub mod login;
pub mod profile;

pub use login::LoginFlow;
pub use profile::ProfileFlow;
