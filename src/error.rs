//! Error types for profile decoding, bind parsing and device access.

use thiserror::Error;

/// Failures reported by the profile codec and bind parser.
///
/// Every variant is a value the caller can inspect; nothing in the codec
/// panics on malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The kind field is not a byte-sized integer.
    #[error("Invalid bind kind '{input}': expected a number between 0 and 255")]
    InvalidKind { input: String },

    /// The payload is neither a known name nor an integer literal.
    #[error("Could not parse '{input}' as a {kind} payload")]
    Unparseable { input: String, kind: &'static str },

    /// The payload resolved to a number outside the span allowed for its kind.
    #[error("Payload {value} is out of range for {kind} (allowed: {min}..{limit})")]
    OutOfRange {
        value: i64,
        kind: &'static str,
        min: i64,
        limit: i64,
    },

    /// A raw key index or physical button number does not exist.
    #[error("Index {index} is outside {min}..={max}")]
    IndexFault { index: usize, min: usize, max: usize },
}

/// Primary error type for the `linapse` tool.
#[derive(Error, Debug)]
pub enum LinapseError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    // Device errors
    #[error("No device directory configured")]
    NoDevice,

    #[error("Device directory not found: {path}")]
    DeviceNotFound { path: String },

    #[error("Device attribute '{name}' is missing")]
    AttributeMissing { name: String },

    #[error("Permission denied writing device attribute '{name}'")]
    PermissionDenied { name: String },

    #[error("Device attribute '{name}' holds unexpected data: {reason}")]
    AttributeInvalid { name: String, reason: String },

    #[error("Device accepted no data for '{name}'")]
    WriteRejected { name: String },

    #[error("Profile holds no data")]
    EmptyProfile,

    // File errors
    #[error("Profile file not found: {path}")]
    FileNotFound { path: String },

    #[error("Layout file error in {path}: {reason}")]
    LayoutParse { path: String, reason: String },

    #[error("Button {button}: {source}")]
    LayoutEntry {
        button: u8,
        #[source]
        source: CodecError,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl LinapseError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Codec(_)
                | Self::NoDevice
                | Self::DeviceNotFound { .. }
                | Self::PermissionDenied { .. }
                | Self::FileNotFound { .. }
                | Self::LayoutParse { .. }
                | Self::LayoutEntry { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
                | Self::ConfigInvalid(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoDevice => {
                Some("Pass --device <DIR> or set device_dir in the configuration file")
            }
            Self::DeviceNotFound { .. } | Self::AttributeMissing { .. } => {
                Some("Is the device plugged in and the hid-tartarus driver loaded?")
            }
            Self::PermissionDenied { .. } => Some("Writing device attributes usually needs root"),
            Self::Codec(CodecError::Unparseable { .. }) => {
                Some("Run: linapse keys (or linapse keys --macros) to list valid names")
            }
            Self::Codec(CodecError::IndexFault { .. }) => Some("Buttons are numbered 1 to 25"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using LinapseError.
pub type Result<T> = std::result::Result<T, LinapseError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| LinapseError::Other(format!("{}: {e}", f().into())))
    }
}
