//! Optional configuration file.
//!
//! ```toml
//! device_dir = "/sys/bus/hid/drivers/hid-tartarus/0003:1532:0201.0004"
//! export_dir = "~/tartarus"
//! ```
//!
//! Command-line flags and environment variables take precedence over
//! anything set here.

mod path;

pub use path::{home_dir, resolve_path, PathResolver};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{LinapseError, Result};

/// File name looked up inside the per-user config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Settings read from the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the driver's attribute files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_dir: Option<PathBuf>,

    /// Where relative `save` and `export` paths are placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Config {
    /// `<config_dir>/linapse/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("linapse").join(CONFIG_FILE))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and a missing file yields the empty configuration.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and resolve a configuration file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LinapseError::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => LinapseError::Io(e),
        })?;

        let config = Self::from_toml_str(&content)?.resolved(&PathResolver::new(path))?;
        info!(
            device_dir = ?config.device_dir,
            export_dir = ?config.export_dir,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration text without resolving paths.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LinapseError::ConfigParse(format!("TOML: {e}")))
    }

    fn resolved(self, resolver: &PathResolver) -> Result<Self> {
        let resolve = |p: Option<PathBuf>| p.map(|p| resolver.resolve(&p)).transpose();
        Ok(Self {
            device_dir: resolve(self.device_dir)?,
            export_dir: resolve(self.export_dir)?,
        })
    }

    /// The device directory to use, preferring `cli` over the file.
    pub fn device_dir(&self, cli: Option<&Path>) -> Result<PathBuf> {
        cli.map(Path::to_path_buf)
            .or_else(|| self.device_dir.clone())
            .ok_or(LinapseError::NoDevice)
    }

    /// Place a relative output path under `export_dir` when one is set.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        match &self.export_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}
