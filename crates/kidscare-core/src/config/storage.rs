//! Durable client storage settings.

use serde::{Deserialize, Serialize};

/// Location of the console's durable key/value storage file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON storage file holding `access_token`, `user` and `theme`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> String {
    "data/console-storage.json".to_string()
}
