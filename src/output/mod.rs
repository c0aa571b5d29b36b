//! Output mode abstraction for robot and human output.

use std::path::Path;

use serde::Serialize;

use crate::bind::Bind;
use crate::cli::Cli;
use crate::error::LinapseError;
use crate::physical::{self, BUTTON_COUNT};
use crate::profile::Profile;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

// === Report Types ===

/// One physical button and its bind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonReport {
    pub button: u8,
    pub raw_code: u8,
    pub kind: String,
    pub kind_byte: u8,
    pub payload: u8,
    /// Key or macro name, decimal for other kinds, empty when disabled.
    pub name: String,
}

impl ButtonReport {
    pub fn new(button: u8, raw_code: u8, bind: Bind) -> Self {
        Self {
            button,
            raw_code,
            kind: bind.kind().label().to_string(),
            kind_byte: bind.kind_byte(),
            payload: bind.payload(),
            name: bind.payload_name(),
        }
    }
}

/// A whole profile, as emitted by `show`, `save`, `load` and `decode`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    /// Device directory or file the profile came from.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
    pub empty: bool,
    pub buttons: Vec<ButtonReport>,
    /// Encoded profile as lowercase hex.
    pub raw: String,
}

impl ProfileReport {
    pub fn new(source: &str, slot: Option<u8>, profile: &Profile) -> Self {
        let buttons = (1..=BUTTON_COUNT)
            .filter_map(|button| {
                let raw = physical::raw_code(button).ok()?;
                let bind = profile.get(raw)?;
                Some(ButtonReport::new(u8::try_from(button).ok()?, raw, bind))
            })
            .collect();

        Self {
            source: source.to_string(),
            slot,
            empty: profile.is_empty(),
            buttons,
            raw: hex::encode(profile.encode()),
        }
    }
}

/// Result of `set-key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub button: u8,
    pub raw_code: u8,
    pub old: Bind,
    pub new: Bind,
}

/// A key or macro name with its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameEntry {
    pub code: u8,
    pub name: String,
}

// === Mode Selection ===

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON output for scripts.
    Robot(RobotFormat),
    /// Styled terminal output.
    Human { color: bool },
}

impl OutputMode {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            Self::Human {
                color: !cli.no_color,
            }
        }
    }

    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { color } => Box::new(HumanOutput::new(color)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &LinapseError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    // Profiles
    fn profile(&self, report: &ProfileReport, profile: &Profile);
    fn profile_selected(&self, requested: u8, active: u8);
    fn key_set(&self, change: &KeyChange);
    fn profile_saved(&self, path: &Path, report: &ProfileReport);
    fn profile_loaded(&self, path: &Path, report: &ProfileReport);

    // Layout documents
    fn layout_exported(&self, path: &Path, buttons: usize);
    fn layout_imported(&self, path: &Path, changed: usize);

    // Name tables
    fn names(&self, title: &str, entries: &[NameEntry]);
    fn resolved(&self, input: &str, entry: &NameEntry);

    // Metadata
    fn version_info(&self, version: &str);
}
