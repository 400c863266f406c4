//! Console configuration schemas.
//!
//! Configuration is layered with the `config` crate: built-in defaults,
//! then `config/default.toml`, then `config/{env}.toml`, then an explicit
//! file, then `KIDSCARE__SECTION__KEY` environment variables.

pub mod api;
pub mod logging;
pub mod storage;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root console configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// REST API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable client storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Load configuration for the given environment name.
    ///
    /// `explicit` is an additional file that must exist when given; the
    /// conventional `config/` files are optional.
    pub fn load(env: &str, explicit: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("KIDSCARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that cannot work at runtime.
    pub fn validate(&self) -> Result<(), AppError> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "api.base_url must be an http(s) URL, got '{base}'"
            )));
        }
        if self.storage.path.trim().is_empty() {
            return Err(AppError::configuration("storage.path must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_files() {
        let config = ConsoleConfig::load("no-such-env", None).unwrap();
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.storage.path, "data/console-storage.json");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.kidscare.test\"\ntimeout_seconds = 0\n\n[storage]\npath = \"/tmp/kc.json\""
        )
        .unwrap();

        let config = ConsoleConfig::load("no-such-env", Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://api.kidscare.test");
        assert!(config.api.timeout().is_none());
        assert_eq!(config.storage.path, "/tmp/kc.json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ConsoleConfig::load("no-such-env", Some(Path::new("/nonexistent/kc.toml")))
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = ConsoleConfig::default();
        config.api.base_url = "ftp://example".to_string();
        assert!(config.validate().is_err());
    }
}
