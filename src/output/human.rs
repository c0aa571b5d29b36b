//! Styled terminal output.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::error::LinapseError;
use crate::profile::{payload_repr, Profile};
use crate::theme::Theme;

use super::{KeyChange, NameEntry, Output, ProfileReport};

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: Theme,
    err_theme: Theme,
}

impl HumanOutput {
    #[instrument]
    pub fn new(color: bool) -> Self {
        debug!("Creating HumanOutput");
        if !color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        let theme = Theme::default();
        Self {
            err_theme: theme.for_stderr(),
            theme,
        }
    }

    fn labelled(&self, label: &str, value: &str) {
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{label:<10}")),
            self.theme.value.apply_to(value)
        );
    }

    fn summary(&self, report: &ProfileReport) {
        let bound = report
            .buttons
            .iter()
            .filter(|b| b.kind_byte != 0 || b.payload != 0)
            .count();
        self.labelled("Buttons", &format!("{bound} of {} bound", report.buttons.len()));
    }
}

impl Output for HumanOutput {
    fn success(&self, message: &str) {
        println!("{} {message}", self.theme.success.apply_to("[OK]"));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &LinapseError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!();
        eprintln!(
            "  {} {}",
            self.err_theme.error.apply_to("[ERR]"),
            self.err_theme.value.apply_to(error)
        );
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!();
            eprintln!("  {}", self.err_theme.label.apply_to("Suggestion:"));
            eprintln!("  {}", self.err_theme.muted.apply_to(suggestion));
        }
        eprintln!();
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {message}", self.err_theme.warning.apply_to("[WARN]"));
    }

    fn info(&self, message: &str) {
        println!("{}", self.theme.muted.apply_to(message));
    }

    fn profile(&self, report: &ProfileReport, profile: &Profile) {
        let title = report
            .slot
            .map_or_else(|| report.source.clone(), |slot| format!("Profile {slot}"));
        println!("{}", self.theme.header.apply_to(title));
        if report.slot.is_some() {
            println!("{}", self.theme.muted.apply_to(&report.source));
        }
        println!();
        println!("{}", profile.render().trim_end());
    }

    fn profile_selected(&self, requested: u8, active: u8) {
        if requested == active {
            self.success(&format!("Switched to profile {active}"));
        } else {
            self.success(&format!(
                "Requested profile {requested}, device selected profile {active}"
            ));
        }
    }

    fn key_set(&self, change: &KeyChange) {
        self.success(&format!(
            "Button {} set",
            self.theme.key_index.apply_to(change.button)
        ));
        self.labelled("Raw code", &format!("{:#04x}", change.raw_code));
        self.labelled(
            "Was",
            &format!("{} {}", change.old.kind().label(), payload_repr(change.old)),
        );
        println!(
            "  {} {} {}",
            self.theme.label.apply_to(format!("{:<10}", "Now")),
            self.theme.kind(change.new.kind()).apply_to(change.new.kind().label()),
            self.theme.value.apply_to(payload_repr(change.new))
        );
    }

    fn profile_saved(&self, path: &Path, report: &ProfileReport) {
        self.success(&format!("Saved profile to {}", path.display()));
        self.summary(report);
    }

    fn profile_loaded(&self, path: &Path, report: &ProfileReport) {
        self.success(&format!("Loaded {} into {}", path.display(), report.source));
        self.summary(report);
    }

    fn layout_exported(&self, path: &Path, buttons: usize) {
        self.success(&format!("Exported {buttons} buttons to {}", path.display()));
    }

    fn layout_imported(&self, path: &Path, changed: usize) {
        if changed == 0 {
            self.info(&format!("{} matches the active profile", path.display()));
        } else {
            self.success(&format!(
                "Imported {}: {changed} button(s) changed",
                path.display()
            ));
        }
    }

    fn names(&self, title: &str, entries: &[NameEntry]) {
        println!("{}", self.theme.header.apply_to(title));
        for entry in entries {
            println!(
                "  {} {}",
                self.theme.key_index.apply_to(format!("{:>3}", entry.code)),
                entry.name
            );
        }
    }

    fn resolved(&self, input: &str, entry: &NameEntry) {
        println!(
            "{} {} {} ({})",
            self.theme.value.apply_to(input),
            self.theme.muted.apply_to("->"),
            self.theme.key_index.apply_to(entry.code),
            entry.name
        );
    }

    fn version_info(&self, version: &str) {
        println!(
            "{} {}",
            self.theme.header.apply_to("linapse"),
            self.theme.value.apply_to(version)
        );
    }
}
