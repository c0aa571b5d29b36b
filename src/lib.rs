//! linapse - Profile editing for Razer Tartarus keypads.
//!
//! The hid-tartarus driver keeps one 512-byte profile per slot and exposes
//! the active one through attribute files. This library decodes those
//! profiles, parses user-entered binds, and reads and writes the device.
//!
//! # Modules
//!
//! - `keycode`: key and macro name tables with alias resolution
//! - `bind`: bind kinds and bind parsing
//! - `profile`: the 512-byte profile codec and grid rendering
//! - `physical`: physical button to raw key code map
//! - `layout`: editable TOML layout documents
//! - `device`: attribute-file access (directory-backed and mock)
//! - `error`: error types with user-recoverable hints
//! - `config`: configuration file handling
//! - `output`: output mode abstraction (robot/human)
//! - `cli`, `logging`, `theme`: command-line surface, tracing setup, terminal styles
#![forbid(unsafe_code)]

pub mod bind;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod keycode;
pub mod layout;
pub mod logging;
pub mod output;
pub mod physical;
pub mod profile;
pub mod theme;
