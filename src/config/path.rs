//! Path resolution for values read from the configuration file.
//!
//! Absolute paths are kept, `~` expands to the home directory, and
//! anything else is taken relative to the directory holding the file.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{LinapseError, Result};

/// Resolve `path` as written in a config file living in `config_dir`.
pub fn resolve_path(path: &Path, config_dir: &Path) -> Result<PathBuf> {
    trace!(path = %path.display(), config_dir = %config_dir.display(), "Resolving path");

    if let Ok(rest) = path.strip_prefix("~") {
        let home = home_dir()?;
        let resolved = if rest.as_os_str().is_empty() {
            home
        } else {
            home.join(rest)
        };
        debug!(original = %path.display(), resolved = %resolved.display(), "Expanded ~");
        return Ok(resolved);
    }

    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(config_dir.join(path))
}

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| LinapseError::ConfigInvalid("Could not determine home directory".to_string()))
}

/// Resolves paths relative to one configuration file.
#[derive(Debug, Clone)]
pub struct PathResolver {
    config_dir: PathBuf,
}

impl PathResolver {
    pub fn new(config_path: &Path) -> Self {
        let config_dir = config_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self { config_dir }
    }

    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        resolve_path(path, &self.config_dir)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}
