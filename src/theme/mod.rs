//! Terminal styles for human-mode output.

use console::Style;

use crate::bind::BindKind;

/// Styles shared by every human-mode message.
#[derive(Debug, Clone)]
pub struct Theme {
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,
    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub key_index: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warning: Style::new().yellow().bold(),
            muted: Style::new().color256(245),
            header: Style::new().blue().bold(),
            label: Style::new().dim(),
            value: Style::new().bold(),
            key_index: Style::new().yellow().bold(),
        }
    }
}

impl Theme {
    /// Theme for text written to stderr.
    pub fn for_stderr(&self) -> Self {
        Self {
            success: self.success.clone().for_stderr(),
            error: self.error.clone().for_stderr(),
            warning: self.warning.clone().for_stderr(),
            muted: self.muted.clone().for_stderr(),
            header: self.header.clone().for_stderr(),
            label: self.label.clone().for_stderr(),
            value: self.value.clone().for_stderr(),
            key_index: self.key_index.clone().for_stderr(),
        }
    }

    /// Style for a bind kind label.
    pub fn kind(&self, kind: BindKind) -> Style {
        match kind {
            BindKind::Disable => self.muted.clone(),
            BindKind::Key => Style::new().cyan(),
            BindKind::Macro | BindKind::Script => Style::new().magenta(),
            BindKind::HyperShift | BindKind::Profile | BindKind::SwitchKey => Style::new().blue(),
            BindKind::Debug | BindKind::Undefined(_) => self.warning.clone(),
        }
    }
}
