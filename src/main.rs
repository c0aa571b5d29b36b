//! linapse - Profile editor for Razer Tartarus keypads.
//!
//! Provides both human-friendly and script-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io;
use std::path::Path;

use clap::{CommandFactory, Parser};
use serde::Serialize;
use tracing::{debug, info};

use linapse::bind::{Bind, KindInput, PayloadInput};
use linapse::cli::{self, Cli, Commands};
use linapse::config::Config;
use linapse::device::{self, BoxedStore};
use linapse::error::{CodecError, Result};
use linapse::keycode::{self, CODES, MACRO_CODES};
use linapse::layout::Layout;
use linapse::logging::init_logging;
use linapse::output::{KeyChange, NameEntry, Output, OutputMode, ProfileReport};
use linapse::physical;
use linapse::profile::Profile;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = Cli::parse();
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let mode = OutputMode::from_cli(&cli);
    let out = mode.into_output();

    if let Err(e) = run(&cli, out.as_ref()) {
        out.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: &dyn Output) -> Result<()> {
    match &cli.command {
        None => {
            print_quick_start(cli);
            Ok(())
        }
        Some(Commands::Show(args)) => cmd_show(cli, out, args),
        Some(Commands::Switch(args)) => cmd_switch(cli, out, args),
        Some(Commands::SetKey(args)) => cmd_set_key(cli, out, args),
        Some(Commands::Save(args)) => cmd_save(cli, out, &args.path),
        Some(Commands::Load(args)) => cmd_load(cli, out, &args.path),
        Some(Commands::Decode(args)) => cmd_decode(out, &args.path),
        Some(Commands::Export(args)) => cmd_export(cli, out, &args.path),
        Some(Commands::Import(args)) => cmd_import(cli, out, &args.path),
        Some(Commands::Keys(args)) => {
            cmd_keys(out, args);
            Ok(())
        }
        Some(Commands::Resolve(args)) => cmd_resolve(out, args),
        Some(Commands::Version) => {
            out.version_info(VERSION);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "linapse", &mut io::stdout());
            Ok(())
        }
    }
}

// === Quick Start ===

fn print_quick_start(cli: &Cli) {
    if cli.use_json() {
        let help = QuickStart {
            tool: "linapse",
            version: VERSION,
            description: "Profile editor for Razer Tartarus keypads (hid-tartarus driver)",
            commands: &[
                ("show", "linapse show [--profile N]"),
                ("switch", "linapse switch <N>"),
                ("set_key", "linapse set-key <BUTTON> <KIND> [PAYLOAD]"),
                ("save", "linapse save <PATH>"),
                ("load", "linapse load <PATH>"),
                ("decode", "linapse decode <PATH>"),
                ("export", "linapse export <PATH>"),
                ("import", "linapse import <PATH>"),
                ("keys", "linapse keys [--macros|--aliases]"),
                ("resolve", "linapse resolve <NAME> [--macros]"),
            ],
            buttons: "Buttons are numbered 1-25, left-to-right, top-to-bottom",
            device: "--device <DIR>, LINAPSE_DEVICE, or device_dir in the config file",
        };
        match serde_json::to_string_pretty(&help) {
            Ok(json) => println!("{json}"),
            Err(e) => debug!(error = %e, "Failed to serialize quick start"),
        }
    } else {
        println!("linapse {VERSION} - Razer Tartarus profile editor\n");
        println!("QUICK START\n");
        println!("  linapse show                 Show the active profile");
        println!("  linapse switch 2             Select profile slot 2");
        println!("  linapse set-key 17 key ctrl  Bind button 17 to left control");
        println!("  linapse export layout.toml   Write an editable layout");
        println!("  linapse import layout.toml   Apply an edited layout");
        println!("  linapse keys                 List key names\n");
        println!("Run linapse --help for full help");
    }
}

#[derive(Serialize)]
struct QuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    commands: &'static [(&'static str, &'static str)],
    buttons: &'static str,
    device: &'static str,
}

// === Device Commands ===

fn open_device(cli: &Cli) -> Result<(Config, BoxedStore)> {
    let config = Config::discover(cli.config.as_deref())?;
    let dir = config.device_dir(cli.device.as_deref())?;
    let store = device::open_boxed(&dir)?;
    debug!(device = %store.location(), "Using device");
    Ok((config, store))
}

fn cmd_show(cli: &Cli, out: &dyn Output, args: &cli::ShowArgs) -> Result<()> {
    let (_, dev) = open_device(cli)?;
    if let Some(slot) = args.profile {
        dev.select_profile(slot)?;
    }

    let slot = dev.active_profile()?;
    let profile = if slot == 0 {
        Profile::new()
    } else {
        dev.read_profile()?
    };
    out.profile(&ProfileReport::new(&dev.location(), Some(slot), &profile), &profile);
    Ok(())
}

fn cmd_switch(cli: &Cli, out: &dyn Output, args: &cli::SwitchArgs) -> Result<()> {
    let (_, dev) = open_device(cli)?;
    dev.select_profile(args.profile)?;
    let active = dev.active_profile()?;
    out.profile_selected(args.profile, active);
    Ok(())
}

fn cmd_set_key(cli: &Cli, out: &dyn Output, args: &cli::SetKeyArgs) -> Result<()> {
    let raw_code = physical::raw_code(args.button)?;
    let bind = Bind::parse(
        KindInput::from_user(&args.kind),
        PayloadInput::from(args.payload.as_deref()),
    )?;
    let button = u8::try_from(args.button).map_err(|_| CodecError::IndexFault {
        index: args.button,
        min: 1,
        max: physical::BUTTON_COUNT,
    })?;

    let (_, dev) = open_device(cli)?;
    let old = dev.modify_key(raw_code, bind)?;

    out.key_set(&KeyChange {
        button,
        raw_code,
        old,
        new: bind,
    });
    Ok(())
}

fn cmd_save(cli: &Cli, out: &dyn Output, path: &Path) -> Result<()> {
    let (config, dev) = open_device(cli)?;
    let path = config.output_path(path);
    let profile = dev.save_profile(&path)?;
    let slot = dev.active_profile().ok();
    out.profile_saved(&path, &ProfileReport::new(&dev.location(), slot, &profile));
    Ok(())
}

fn cmd_load(cli: &Cli, out: &dyn Output, path: &Path) -> Result<()> {
    let (_, dev) = open_device(cli)?;
    let profile = dev.load_profile(path)?;
    let slot = dev.active_profile().ok();
    out.profile_loaded(path, &ProfileReport::new(&dev.location(), slot, &profile));
    Ok(())
}

fn cmd_decode(out: &dyn Output, path: &Path) -> Result<()> {
    let raw = device::read_exchange_file(path)?;
    let profile = Profile::decode(&raw);
    info!(path = %path.display(), len = raw.len(), "Decoded profile file");
    out.profile(
        &ProfileReport::new(&path.display().to_string(), None, &profile),
        &profile,
    );
    Ok(())
}

// === Layout Commands ===

fn cmd_export(cli: &Cli, out: &dyn Output, path: &Path) -> Result<()> {
    let (config, dev) = open_device(cli)?;
    let slot = dev.active_profile().ok();
    let profile = dev.read_profile()?;

    let layout = Layout::from_profile(&profile, slot);
    let path = config.output_path(path);
    layout.write(&path)?;
    out.layout_exported(&path, layout.keys.len());
    Ok(())
}

fn cmd_import(cli: &Cli, out: &dyn Output, path: &Path) -> Result<()> {
    let layout = Layout::read(path)?;
    let (_, dev) = open_device(cli)?;

    if let Some(slot) = layout.profile {
        let active = dev.active_profile()?;
        if slot != active {
            out.warning(&format!(
                "Layout was exported from profile {slot}, applying to active profile {active}"
            ));
        }
    }

    let mut profile = dev.read_profile()?;
    let changed = layout.apply(&mut profile)?;
    if changed > 0 {
        dev.write_profile(&profile)?;
    }
    out.layout_imported(path, changed);
    Ok(())
}

// === Name Tables ===

fn named(table: &[Option<&str>]) -> Vec<NameEntry> {
    table
        .iter()
        .enumerate()
        .filter_map(|(code, name)| {
            Some(NameEntry {
                code: u8::try_from(code).ok()?,
                name: (*name)?.to_string(),
            })
        })
        .collect()
}

fn cmd_keys(out: &dyn Output, args: &cli::KeysArgs) {
    if args.macros {
        out.names("Macro names", &named(&MACRO_CODES));
    } else if args.aliases {
        let entries: Vec<NameEntry> = keycode::aliases()
            .into_iter()
            .map(|(name, code)| NameEntry {
                code,
                name: name.to_string(),
            })
            .collect();
        out.names("Key names and aliases", &entries);
    } else {
        out.names("Key names", &named(&CODES));
    }
}

fn cmd_resolve(out: &dyn Output, args: &cli::ResolveArgs) -> Result<()> {
    let (code, name, kind) = if args.macros {
        let code = keycode::resolve_macro(&args.name);
        (code, code.and_then(keycode::macro_name), "MACRO")
    } else {
        let code = keycode::resolve_name(&args.name);
        (code, code.and_then(keycode::code_name), "KEY")
    };

    match (code, name) {
        (Some(code), Some(name)) => {
            out.resolved(
                &args.name,
                &NameEntry {
                    code,
                    name: name.to_string(),
                },
            );
            Ok(())
        }
        _ => Err(CodecError::Unparseable {
            input: args.name.clone(),
            kind,
        }
        .into()),
    }
}
