//! Robot mode JSON output.

use std::path::Path;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, instrument, trace};

use crate::error::LinapseError;
use crate::profile::Profile;

use super::{ButtonReport, KeyChange, NameEntry, Output, ProfileReport, RobotFormat};

/// JSON output implementation for scripts.
///
/// Results go to stdout, errors to stderr, one document per call.
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let result = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match result {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize output");
                None
            }
        }
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }
}

impl Output for RobotOutput {
    fn success(&self, message: &str) {
        self.output_json(&json!({
            "success": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &LinapseError) {
        debug!(error = %error, "Robot: error");
        let doc = json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        if let Some(json) = self.render(&doc) {
            eprintln!("{json}");
        }
    }

    fn warning(&self, message: &str) {
        self.output_json(&json!({
            "warning": true,
            "message": message
        }));
    }

    fn info(&self, message: &str) {
        self.output_json(&json!({
            "info": true,
            "message": message
        }));
    }

    #[instrument(skip_all, fields(source = %report.source))]
    fn profile(&self, report: &ProfileReport, _profile: &Profile) {
        debug!("Robot: profile");
        self.output_json(report);
    }

    fn profile_selected(&self, requested: u8, active: u8) {
        self.output_json(&json!({
            "success": true,
            "requested": requested,
            "active": active
        }));
    }

    fn key_set(&self, change: &KeyChange) {
        self.output_json(&json!({
            "success": true,
            "button": change.button,
            "raw_code": change.raw_code,
            "old": ButtonReport::new(change.button, change.raw_code, change.old),
            "new": ButtonReport::new(change.button, change.raw_code, change.new),
            "display": change.new.display_string(),
        }));
    }

    fn profile_saved(&self, path: &Path, report: &ProfileReport) {
        self.output_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "profile": report
        }));
    }

    fn profile_loaded(&self, path: &Path, report: &ProfileReport) {
        self.output_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "profile": report
        }));
    }

    fn layout_exported(&self, path: &Path, buttons: usize) {
        self.output_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "buttons": buttons
        }));
    }

    fn layout_imported(&self, path: &Path, changed: usize) {
        self.output_json(&json!({
            "success": true,
            "path": path.display().to_string(),
            "changed": changed
        }));
    }

    fn names(&self, _title: &str, entries: &[NameEntry]) {
        self.output_json(entries);
    }

    fn resolved(&self, input: &str, entry: &NameEntry) {
        self.output_json(&json!({
            "input": input,
            "code": entry.code,
            "name": entry.name
        }));
    }

    fn version_info(&self, version: &str) {
        self.output_json(&json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": version
        }));
    }
}
