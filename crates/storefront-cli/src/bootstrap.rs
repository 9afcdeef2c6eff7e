use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use storefront_application::SessionStore;
use storefront_infrastructure::{
    ConfigService, FileKeyValueStorage, KeyValueSessionRepository, paths::StorefrontPaths,
};
use tracing_subscriber::EnvFilter;

pub struct AppBootstrap {
    pub session_store: SessionStore,
}

impl AppBootstrap {
    /// Loads config, installs logging, and brings the session store up.
    pub async fn initialize(data_dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let paths = StorefrontPaths::new(data_dir);
        let config_service = match config {
            Some(path) => ConfigService::with_path(path, paths),
            None => ConfigService::new(paths)?,
        };
        let config = config_service.get_config()?;

        init_logging(&config.logging.level)?;

        let storage_dir = config_service.storage_dir()?;
        tracing::info!("[Bootstrap] Session storage at {:?}", storage_dir);

        let storage = Arc::new(FileKeyValueStorage::new(storage_dir));
        let repository = KeyValueSessionRepository::new(storage, config.storage.session_key);
        let session_store = SessionStore::init(Arc::new(repository)).await;

        Ok(Self { session_store })
    }

    pub fn shutdown(self) {
        self.session_store.dispose();
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}
