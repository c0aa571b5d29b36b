//! Tracing setup for the `linapse` binary.
//!
//! Logs always go to stderr so stdout stays clean for profile grids and
//! JSON documents.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
///
/// `-q` wins over `-v`: quiet shows errors only, otherwise each `-v` step
/// raises the level from info to debug to trace.
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "linapse=error";
    }
    match verbose {
        0 => "linapse=info",
        1 => "linapse=debug",
        _ => "linapse=trace",
    }
}

/// Install the global subscriber.
///
/// | Mode  | stderr TTY | Format                  |
/// |-------|------------|-------------------------|
/// | robot | any        | JSON lines              |
/// | human | yes        | colored, no targets     |
/// | human | no         | compact, no ANSI        |
///
/// `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    let registry = tracing_subscriber::registry().with(filter);

    if robot_mode {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_writer(io::stderr),
            )
            .init();
    } else if io::stderr().is_terminal() {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init();
    }
}
