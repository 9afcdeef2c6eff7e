//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml` and caches it.
//!
//! The file holds a single versioned `[[app_config]]` entry:
//!
//! ```toml
//! [[app_config]]
//! version = "1.0.0"
//!
//! [app_config.storage]
//! session_key = "userSession"
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use storefront_core::config::AppConfig;
use storefront_core::error::{Result, StorefrontError};
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

use crate::dto::create_app_config_migrator;
use crate::paths::StorefrontPaths;

const CONFIG_ENTITY: &str = "app_config";

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    paths: StorefrontPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses `config.toml` in the resolved config directory.
    pub fn new(paths: StorefrontPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| StorefrontError::config(e.to_string()))?;
        Ok(Self::with_path(path, paths))
    }

    /// Uses an explicit config file.
    pub fn with_path(path: impl Into<PathBuf>, paths: StorefrontPaths) -> Self {
        Self {
            path: path.into(),
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults. A file that does not parse is a
    /// configuration error.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Directory for the key-value files: the configured one, or the
    /// platform default.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = self.get_config()?.storage.dir {
            return Ok(dir);
        }
        self.paths
            .storage_dir()
            .map_err(|e| StorefrontError::config(e.to_string()))
    }

    /// Loads AppConfig from the config file using FileStorage.
    ///
    /// A missing or empty file is seeded with the defaults. Failing to write
    /// the seed is not fatal.
    fn load_config(path: &Path) -> Result<AppConfig> {
        let to_config_error = |e: version_migrate::MigrationError| {
            StorefrontError::config(format!("Failed to load {}: {}", path.display(), e))
        };

        let migrator = create_app_config_migrator();
        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Toml)
            .with_load_behavior(LoadBehavior::CreateIfMissing);

        let mut storage =
            FileStorage::new(path.to_path_buf(), migrator, strategy).map_err(to_config_error)?;

        let configs: Vec<AppConfig> = storage.query(CONFIG_ENTITY).map_err(to_config_error)?;

        match configs.into_iter().next() {
            Some(config) => Ok(config),
            None => {
                tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
                let default_config = AppConfig::default();
                if let Err(e) = storage.update_and_save(CONFIG_ENTITY, vec![default_config.clone()])
                {
                    tracing::warn!("[ConfigService] Failed to write default config: {}", e);
                }
                Ok(default_config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::config::DEFAULT_SESSION_KEY;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StorefrontPaths::new(Some(temp_dir.path().to_path_buf()));
        let service = ConfigService::new(paths).unwrap();

        let config = service.get_config().unwrap();
        assert_eq!(config.storage.session_key, DEFAULT_SESSION_KEY);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            service.storage_dir().unwrap(),
            temp_dir.path().join("data").join("storage")
        );

        let written = std::fs::read_to_string(service.path()).unwrap();
        assert!(written.contains("[[app_config]]"));
        assert!(written.contains("version = \"1.0.0\""));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[[app_config]]\nversion = \"1.0.0\"\n\n[app_config.storage]\ndir = \"/var/lib/storefront\"\n",
        )
        .unwrap();

        let service = ConfigService::with_path(&path, StorefrontPaths::default());
        let config = service.get_config().unwrap();
        assert_eq!(config.storage.session_key, DEFAULT_SESSION_KEY);
        assert_eq!(
            service.storage_dir().unwrap(),
            PathBuf::from("/var/lib/storefront")
        );
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let service = ConfigService::with_path(&path, StorefrontPaths::default());
        assert!(matches!(
            service.get_config(),
            Err(StorefrontError::Config(_))
        ));
    }

    #[test]
    fn test_unversioned_entry_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[[app_config]]\n\n[app_config.logging]\nlevel = \"debug\"\n")
            .unwrap();

        let service = ConfigService::with_path(&path, StorefrontPaths::default());
        assert!(matches!(
            service.get_config(),
            Err(StorefrontError::Config(_))
        ));
    }

    #[test]
    fn test_invalidate_cache_rereads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(&path, StorefrontPaths::default());
        assert_eq!(service.get_config().unwrap().logging.level, "info");

        std::fs::write(
            &path,
            "[[app_config]]\nversion = \"1.0.0\"\n\n[app_config.logging]\nlevel = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(service.get_config().unwrap().logging.level, "info");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.level, "debug");
    }
}
