//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// linapse - Profile editor for Razer Tartarus keypads.
///
/// Reads and writes key binds through the hid-tartarus driver's attribute
/// files. Robot Mode: use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "linapse", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (text for humans, json for scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "LINAPSE_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output (any `NO_COLOR` value other than 0/false/no/off)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Device directory holding the driver's attribute files
    #[arg(long, short = 'd', global = true, env = "LINAPSE_DEVICE", value_name = "DIR")]
    pub device: Option<PathBuf>,

    /// Configuration file (default: <config dir>/linapse/config.toml)
    #[arg(long, short = 'c', global = true, env = "LINAPSE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// Pretty JSON for scripts
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Profiles on the device ===
    /// Show the active profile as a button grid
    Show(ShowArgs),

    /// Select the active profile slot
    Switch(SwitchArgs),

    /// Bind one physical button of the active profile
    SetKey(SetKeyArgs),

    // === Exchange files ===
    /// Copy the active profile to a raw profile file
    Save(PathArgs),

    /// Write a raw profile file to the active profile
    Load(PathArgs),

    /// Render a raw profile file without touching the device
    Decode(PathArgs),

    // === Layout documents ===
    /// Write the active profile as an editable TOML layout
    Export(PathArgs),

    /// Apply a TOML layout to the active profile
    Import(PathArgs),

    // === Name tables ===
    /// List key names (or macro names)
    Keys(KeysArgs),

    /// Show which code a key or macro name stands for
    Resolve(ResolveArgs),

    // === Utilities ===
    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Select this profile slot first
    #[arg(long, short = 'p', value_name = "N")]
    pub profile: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct SwitchArgs {
    /// Profile slot (0 deselects; numbers above the slot count wrap)
    pub profile: u8,
}

/// Arguments for binding a button.
///
/// # Examples
///
/// ```bash
/// # Button 17 sends left control
/// linapse set-key 17 key ctrl
///
/// # Button 1 plays macro M1
/// linapse set-key 1 macro M1
///
/// # Button 5 switches to profile 3
/// linapse set-key 5 profile 3
///
/// # Disable button 2
/// linapse set-key 2 disable
/// ```
#[derive(Parser, Debug)]
pub struct SetKeyArgs {
    /// Physical button (1-25, left-to-right, top-to-bottom)
    pub button: usize,

    /// Bind kind: label (KEY, MACRO, SHIFT, ...) or number
    pub kind: String,

    /// Key or macro name, or a number (omit for DISABLE)
    pub payload: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PathArgs {
    /// File path
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// List macro names instead of key names
    #[arg(long, short = 'm', conflicts_with = "aliases")]
    pub macros: bool,

    /// Include every accepted alias spelling
    #[arg(long, short = 'a')]
    pub aliases: bool,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Name to look up (case and spaces are ignored)
    pub name: String,

    /// Look the name up in the macro table
    #[arg(long, short = 'm')]
    pub macros: bool,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
