//! AppConfig DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use storefront_core::config::{AppConfig, LoggingSettings, StorageSettings};

/// Application configuration V1.0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AppConfigV1_0_0 {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<AppConfig> for AppConfigV1_0_0 {
    fn into_domain(self) -> AppConfig {
        AppConfig {
            storage: self.storage,
            logging: self.logging,
        }
    }
}

impl FromDomain<AppConfig> for AppConfigV1_0_0 {
    fn from_domain(config: AppConfig) -> Self {
        AppConfigV1_0_0 {
            storage: config.storage,
            logging: config.logging,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the `app_config` entity.
pub fn create_app_config_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let config_path = version_migrate::Migrator::define("app_config")
        .from::<AppConfigV1_0_0>()
        .into_with_save::<AppConfig>();

    migrator
        .register(config_path)
        .expect("Failed to register app_config migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_flat_fills_defaults() {
        let migrator = create_app_config_migrator();
        let value = serde_json::json!({
            "version": "1.0.0",
            "logging": { "level": "debug" }
        });

        let config: AppConfig = migrator.load_flat_from("app_config", value).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage, StorageSettings::default());
    }

    #[test]
    fn test_unversioned_entry_is_rejected() {
        let migrator = create_app_config_migrator();
        let value = serde_json::json!({ "logging": { "level": "debug" } });

        assert!(
            migrator
                .load_flat_from::<AppConfig, _>("app_config", value)
                .is_err()
        );
    }
}
