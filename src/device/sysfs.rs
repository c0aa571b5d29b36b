//! Attribute files in a device directory.
//!
//! Typically `/sys/bus/hid/drivers/hid-tartarus/<device>/`, but any
//! directory holding the same files works (handy for testing).

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::AttributeStore;
use crate::error::{LinapseError, Result};

/// Largest read the driver serves for one attribute.
pub const PAGE_SIZE: u64 = 4096;

/// Device reached through a directory of attribute files.
#[derive(Debug, Clone)]
pub struct SysfsDevice {
    dir: PathBuf,
}

impl SysfsDevice {
    /// Use `dir` as the attribute directory.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(LinapseError::DeviceNotFound {
                path: dir.display().to_string(),
            });
        }
        debug!(dir = %dir.display(), "Opened device directory");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn map_io(name: &str, e: io::Error) -> LinapseError {
        match e.kind() {
            io::ErrorKind::NotFound => LinapseError::AttributeMissing {
                name: name.to_string(),
            },
            io::ErrorKind::PermissionDenied => LinapseError::PermissionDenied {
                name: name.to_string(),
            },
            _ => LinapseError::Io(e),
        }
    }
}

impl AttributeStore for SysfsDevice {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn read_attr(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.dir.join(name);
        let file = File::open(&path).map_err(|e| Self::map_io(name, e))?;

        let mut buf = Vec::new();
        file.take(PAGE_SIZE)
            .read_to_end(&mut buf)
            .map_err(|e| Self::map_io(name, e))?;
        trace!(name, len = buf.len(), "Read attribute");
        Ok(buf)
    }

    fn write_attr(&self, name: &str, data: &[u8]) -> Result<usize> {
        let path = self.dir.join(name);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| Self::map_io(name, e))?;

        // Attribute stores consume a single write call.
        let written = file.write(data).map_err(|e| Self::map_io(name, e))?;
        trace!(name, len = data.len(), written, "Wrote attribute");
        Ok(written)
    }
}
