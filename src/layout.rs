//! Human-editable layout documents.
//!
//! A layout lists the 25 physical buttons with their bind kind and payload
//! as text, so a profile can be reviewed and edited in any text editor:
//!
//! ```toml
//! profile = 2
//!
//! [[key]]
//! button = 17
//! kind = "KEY"
//! payload = "LCTRL"
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::bind::{Bind, BindKind, KindInput, PayloadInput};
use crate::error::{LinapseError, Result, ResultExt};
use crate::physical::{self, BUTTON_COUNT};
use crate::profile::{payload_repr, Profile};

/// A profile described button by button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Profile slot the layout was exported from (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<u8>,

    #[serde(default, rename = "key")]
    pub keys: Vec<KeyEntry>,
}

/// One physical button's bind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// Physical button number, 1..=25.
    pub button: u8,
    /// Kind label (`KEY`, `MACRO`, ...) or kind number.
    pub kind: String,
    /// Key or macro name, or a number. Empty for disabled keys.
    #[serde(default)]
    pub payload: String,
}

impl KeyEntry {
    fn from_bind(button: u8, bind: Bind) -> Self {
        let kind = match bind.kind() {
            BindKind::Undefined(byte) => byte.to_string(),
            named => named.label().to_string(),
        };
        let payload = match bind.kind() {
            BindKind::Disable if bind.payload() == 0 => String::new(),
            BindKind::Key | BindKind::Macro => payload_repr(bind),
            _ => bind.payload().to_string(),
        };
        Self {
            button,
            kind,
            payload,
        }
    }

    /// Parse the entry into the raw key code and bind it describes.
    pub fn resolve(&self) -> Result<(u8, Bind)> {
        let wrap = |source| LinapseError::LayoutEntry {
            button: self.button,
            source,
        };

        let raw = physical::raw_code(usize::from(self.button)).map_err(wrap)?;
        let kind = KindInput::from_user(&self.kind);
        let bind = Bind::parse(kind, PayloadInput::from(self.payload.as_str())).map_err(wrap)?;
        Ok((raw, bind))
    }
}

impl Layout {
    /// Describe every physical button of `profile`.
    pub fn from_profile(profile: &Profile, slot: Option<u8>) -> Self {
        let keys = (1..=BUTTON_COUNT)
            .filter_map(|button| {
                let bind = profile.button(button).ok()?;
                Some(KeyEntry::from_bind(u8::try_from(button).ok()?, bind))
            })
            .collect();

        Self {
            profile: slot,
            keys,
        }
    }

    /// Write every entry into `profile`.
    ///
    /// All entries are parsed before anything is written, so a bad entry
    /// leaves the profile untouched. Raw codes without a physical button
    /// are never modified.
    pub fn apply(&self, profile: &mut Profile) -> Result<usize> {
        let resolved = self
            .keys
            .iter()
            .map(KeyEntry::resolve)
            .collect::<Result<Vec<_>>>()?;

        let mut updated = if profile.is_empty() {
            Profile::filled()
        } else {
            profile.clone()
        };
        for (raw, bind) in resolved {
            updated.set_bind(usize::from(raw), bind)?;
        }

        let changes = profile.changes(&updated);
        for (raw, old, new) in &changes {
            trace!(raw, old = %old.display_string(), new = %new.display_string(), "Key changed");
        }
        debug!(entries = self.keys.len(), changed = changes.len(), "Applied layout");
        *profile = updated;
        Ok(changes.len())
    }

    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context(|| "Serializing layout")
    }

    /// Read a layout file.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LinapseError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LinapseError::Io(e),
        })?;

        let layout = Self::from_toml_str(&text).map_err(|e| LinapseError::LayoutParse {
            path: path.display().to_string(),
            reason: e.message().to_string(),
        })?;
        debug!(path = %path.display(), keys = layout.keys.len(), "Read layout");
        Ok(layout)
    }

    /// Write the layout as TOML.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        info!(path = %path.display(), "Wrote layout");
        Ok(())
    }
}
