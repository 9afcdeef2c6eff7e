//! Path management for storefront configuration and data files.
//!
//! ```text
//! ~/.config/storefront/        # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/storefront/   # Data directory
//! └── storage/                 # Key-value files
//!     └── userSession.json
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "storefront";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves storefront directories.
///
/// With a base override every path lives under that directory, which is how
/// tests and the CLI's `--data-dir` keep away from the real user profile.
#[derive(Debug, Clone, Default)]
pub struct StorefrontPaths {
    base: Option<PathBuf>,
}

impl StorefrontPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.join("data")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Default directory for `FileKeyValueStorage`.
    pub fn storage_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let paths = StorefrontPaths::new(Some(PathBuf::from("/tmp/sf")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/sf/config/config.toml")
        );
        assert_eq!(
            paths.storage_dir().unwrap(),
            PathBuf::from("/tmp/sf/data/storage")
        );
    }
}
