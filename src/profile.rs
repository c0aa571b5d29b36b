//! Fixed-layout profile codec.
//!
//! A profile is 256 binds indexed by raw key code. On the wire each bind
//! takes two bytes, kind then payload, for exactly 512 bytes with no header
//! or checksum.

use std::fmt;

use tracing::trace;

use crate::bind::{Bind, BindKind};
use crate::error::CodecError;
use crate::keycode;
use crate::physical;

/// Binds per profile, one per raw key code.
pub const KEY_COUNT: usize = 256;

/// Encoded profile size in bytes.
pub const PROFILE_SIZE: usize = KEY_COUNT * 2;

/// Shown by [`Profile::render`] when the profile holds nothing.
pub const NO_DATA: &str = "[ No data ]";

const CELL_WIDTH: usize = 10;

/// The complete key layout of one device profile slot.
///
/// A profile is either empty (freshly constructed) or holds exactly
/// [`KEY_COUNT`] binds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    keymap: Vec<Bind>,
}

impl Profile {
    /// An empty profile.
    pub const fn new() -> Self {
        Self { keymap: Vec::new() }
    }

    /// A populated profile with every key disabled.
    pub fn filled() -> Self {
        Self {
            keymap: vec![Bind::DISABLED; KEY_COUNT],
        }
    }

    /// Decode a raw profile buffer.
    ///
    /// Missing bytes read as zero, so a short buffer yields disabled keys at
    /// the tail. Bytes past [`PROFILE_SIZE`] are ignored.
    pub fn decode(buf: &[u8]) -> Self {
        let byte = |idx: usize| buf.get(idx).copied().unwrap_or(0);
        let keymap = (0..KEY_COUNT)
            .map(|key| Bind::from_raw(byte(2 * key), byte(2 * key + 1)))
            .collect();

        trace!(len = buf.len(), "Decoded profile");
        Self { keymap }
    }

    /// Encode to the wire layout.
    ///
    /// A populated profile always yields [`PROFILE_SIZE`] bytes; an empty
    /// profile yields an empty buffer, which callers treat as "no data".
    pub fn encode(&self) -> Vec<u8> {
        let buf: Vec<u8> = self
            .keymap
            .iter()
            .take(KEY_COUNT)
            .flat_map(|bind| [bind.kind_byte(), bind.payload()])
            .collect();

        trace!(len = buf.len(), "Encoded profile");
        buf
    }

    pub fn is_empty(&self) -> bool {
        self.keymap.is_empty()
    }

    /// Number of binds held: 0 or [`KEY_COUNT`].
    pub fn len(&self) -> usize {
        self.keymap.len()
    }

    pub fn get(&self, raw: u8) -> Option<Bind> {
        self.keymap.get(usize::from(raw)).copied()
    }

    /// Replace the bind for a raw key code.
    pub fn set_bind(&mut self, raw: usize, bind: Bind) -> Result<(), CodecError> {
        let slot = self.keymap.get_mut(raw).ok_or(CodecError::IndexFault {
            index: raw,
            min: 0,
            max: KEY_COUNT - 1,
        })?;
        trace!(raw, %bind, "Setting bind");
        *slot = bind;
        Ok(())
    }

    /// Bind assigned to a 1-based physical button.
    pub fn button(&self, button: usize) -> Result<Bind, CodecError> {
        let raw = physical::raw_code(button)?;
        self.get(raw).ok_or(CodecError::IndexFault {
            index: usize::from(raw),
            min: 0,
            max: self.keymap.len().saturating_sub(1),
        })
    }

    /// Replace the bind for a 1-based physical button.
    pub fn set_button(&mut self, button: usize, bind: Bind) -> Result<(), CodecError> {
        let raw = physical::raw_code(button)?;
        self.set_bind(usize::from(raw), bind)
    }

    /// Raw key codes whose binds differ between two profiles, with the old
    /// and new bind.
    pub fn changes(&self, other: &Self) -> Vec<(u8, Bind, Bind)> {
        (0..=u8::MAX)
            .filter_map(|raw| {
                let old = self.get(raw).unwrap_or_default();
                let new = other.get(raw).unwrap_or_default();
                (old != new).then_some((raw, old, new))
            })
            .collect()
    }

    /// Draw the 25 physical buttons as a 5x5 grid.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_DATA.to_string();
        }

        let mut out = String::new();
        for (row_idx, row) in physical::rows().enumerate() {
            if row_idx > 0 {
                out.push('\n');
            }
            let cells: Vec<(usize, Bind)> = row
                .map(|(button, raw)| (button, self.get(raw).unwrap_or_default()))
                .collect();

            let top: Vec<String> = cells
                .iter()
                .map(|(button, _)| format!("┏╸{button:02}╺{}┓", "━".repeat(CELL_WIDTH - 4)))
                .collect();
            let kinds: Vec<String> = cells
                .iter()
                .map(|(_, bind)| cell(bind.kind().label()))
                .collect();
            let payloads: Vec<String> = cells
                .iter()
                .map(|(_, bind)| cell(&payload_repr(*bind)))
                .collect();
            let bottom = format!("┗{}┛", "━".repeat(CELL_WIDTH));

            let bottoms = vec![bottom; cells.len()];
            for line in [top, kinds, payloads, bottoms] {
                out.push_str(&line.join(" "));
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Name for named key and macro payloads, hex literal for everything else.
pub fn payload_repr(bind: Bind) -> String {
    let name = match bind.kind() {
        BindKind::Key => keycode::code_name(bind.payload()),
        BindKind::Macro => keycode::macro_name(bind.payload()),
        _ => None,
    };
    name.map_or_else(|| format!("{:#x}", bind.payload()), str::to_string)
}

fn cell(text: &str) -> String {
    let text: String = text.chars().take(CELL_WIDTH).collect();
    format!("┃{text:<CELL_WIDTH$}┃")
}
