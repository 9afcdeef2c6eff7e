use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use version_migrate::DeriveQueryable as Queryable;

/// Storage key the session record lives under.
pub const DEFAULT_SESSION_KEY: &str = "userSession";

/// Application configuration, stored as the `app_config` entry of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, Queryable)]
#[queryable(entity = "app_config")]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Directory holding the key-value files. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: None,
            session_key: default_session_key(),
        }
    }
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
