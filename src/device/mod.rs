//! Device attribute access.
//!
//! The hid-tartarus driver exposes the active profile as plain attribute
//! files. This module provides a trait over those files with a directory
//! backed implementation and an in-memory mock, plus the profile-level
//! operations built on top of them.

pub mod mock;
mod sysfs;

pub use sysfs::{SysfsDevice, PAGE_SIZE};

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::bind::Bind;
use crate::error::{LinapseError, Result};
use crate::profile::{Profile, PROFILE_SIZE};

/// Raw profile record of the active slot.
pub const PROFILE_ATTR: &str = "profile";

/// Active slot number, decimal text. Writing selects a slot.
pub const PROFILE_NUM_ATTR: &str = "profile_num";

/// Number of slots the driver holds.
pub const PROFILE_COUNT_ATTR: &str = "profile_count";

/// Byte-level access to a device's attribute files.
///
/// Only [`read_attr`](Self::read_attr) and [`write_attr`](Self::write_attr)
/// touch the device; everything else is built from them.
pub trait AttributeStore {
    /// Where the attributes live, for messages.
    fn location(&self) -> String;

    /// Read an attribute's current contents.
    fn read_attr(&self, name: &str) -> Result<Vec<u8>>;

    /// Write an attribute, returning how many bytes the device accepted.
    fn write_attr(&self, name: &str, data: &[u8]) -> Result<usize>;

    /// Active profile slot. Slot 0 means no profile is selected.
    fn active_profile(&self) -> Result<u8> {
        read_number(self, PROFILE_NUM_ATTR)
    }

    /// Number of profile slots on the device.
    fn profile_count(&self) -> Result<u8> {
        read_number(self, PROFILE_COUNT_ATTR)
    }

    /// Select a profile slot.
    ///
    /// Numbers above the slot count are still written; the driver wraps
    /// them around.
    fn select_profile(&self, slot: u8) -> Result<()> {
        match self.profile_count() {
            Ok(count) if slot > count => {
                warn!(slot, count, "Requested profile number exceeds slot count");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Could not read profile count"),
        }

        let written = self.write_attr(PROFILE_NUM_ATTR, slot.to_string().as_bytes())?;
        if written == 0 {
            return Err(LinapseError::WriteRejected {
                name: PROFILE_NUM_ATTR.to_string(),
            });
        }
        info!(slot, "Selected profile");
        Ok(())
    }

    /// Read and decode the active profile.
    fn read_profile(&self) -> Result<Profile> {
        let raw = self.read_attr(PROFILE_ATTR)?;
        if raw.len() < PROFILE_SIZE {
            debug!(len = raw.len(), "Short profile read, padding with disabled keys");
        }
        Ok(Profile::decode(&raw))
    }

    /// Encode and write a profile to the active slot.
    fn write_profile(&self, profile: &Profile) -> Result<usize> {
        let buf = profile.encode();
        if buf.is_empty() {
            return Err(LinapseError::EmptyProfile);
        }

        let written = self.write_attr(PROFILE_ATTR, &buf)?;
        if written == 0 {
            return Err(LinapseError::WriteRejected {
                name: PROFILE_ATTR.to_string(),
            });
        }
        debug!(written, "Wrote profile");
        Ok(written)
    }

    /// Change one bind of the active profile, returning the bind it replaced.
    ///
    /// Nothing is written when the key already holds `bind`.
    fn modify_key(&self, raw: u8, bind: Bind) -> Result<Bind> {
        let mut profile = self.read_profile()?;
        let old = profile.get(raw).unwrap_or_default();
        if old == bind {
            debug!(raw, %bind, "Key already bound, skipping write");
            return Ok(old);
        }

        profile.set_bind(usize::from(raw), bind)?;
        self.write_profile(&profile)?;
        info!(raw, %old, %bind, "Modified key");
        Ok(old)
    }

    /// Copy the active profile to an exchange file.
    fn save_profile(&self, path: &Path) -> Result<Profile> {
        let profile = self.read_profile()?;
        fs::write(path, profile.encode())?;
        info!(path = %path.display(), "Saved profile");
        Ok(profile)
    }

    /// Load an exchange file into the active slot.
    ///
    /// At most [`PROFILE_SIZE`] bytes are used; shorter files are zero padded.
    fn load_profile(&self, path: &Path) -> Result<Profile> {
        let mut buf = read_exchange_file(path)?;
        buf.truncate(PROFILE_SIZE);
        buf.resize(PROFILE_SIZE, 0);

        let written = self.write_attr(PROFILE_ATTR, &buf)?;
        if written == 0 {
            return Err(LinapseError::WriteRejected {
                name: PROFILE_ATTR.to_string(),
            });
        }
        info!(path = %path.display(), "Loaded profile");
        Ok(Profile::decode(&buf))
    }
}

/// Read a profile exchange file from disk.
pub fn read_exchange_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LinapseError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LinapseError::Io(e),
    })
}

/// Parse the first line of a numeric attribute.
fn read_number<S: AttributeStore + ?Sized>(store: &S, name: &str) -> Result<u8> {
    let raw = store.read_attr(name)?;
    let text = String::from_utf8_lossy(&raw);
    let line = text.lines().next().unwrap_or("").trim();
    trace!(name, line, "Read numeric attribute");

    line.parse().map_err(|_| LinapseError::AttributeInvalid {
        name: name.to_string(),
        reason: format!("expected a number, got '{line}'"),
    })
}

/// Type alias for boxed trait object.
pub type BoxedStore = Box<dyn AttributeStore>;

/// Open a device directory as a boxed store.
pub fn open_boxed(dir: &Path) -> Result<BoxedStore> {
    Ok(Box::new(SysfsDevice::open(dir)?))
}
