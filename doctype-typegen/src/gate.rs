//! Reasons a generation request is declined without touching the disk.

use std::fmt;

use camino::Utf8PathBuf;

use crate::generator::LifecyclePhase;

/// Apps whose DocTypes are never given declarations.
pub const PROTECTED_APPS: [&str; 2] = ["frappe", "erpnext"];

/// Returns whether `app` is one of the [`PROTECTED_APPS`].
#[must_use]
pub fn is_protected_app(app: &str) -> bool {
    PROTECTED_APPS.contains(&app)
}

/// Why a run or a single DocType was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The site config pauses generation.
    Paused,
    /// A schema lifecycle operation is in progress.
    LifecyclePhase(LifecyclePhase),
    /// Developer mode is off for the site.
    DeveloperModeDisabled,
    /// The DocType was created through the UI.
    CustomDoctype,
    /// The DocType has no backing table.
    VirtualDoctype,
    /// The DocType belongs to a framework app.
    ProtectedApp(String),
    /// The owning app is not checked out under the apps root.
    MissingAppDirectory(Utf8PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paused => f.write_str("type generation is paused"),
            Self::LifecyclePhase(phase) => write!(f, "skipping type generation during {phase}"),
            Self::DeveloperModeDisabled => f.write_str("developer mode is not enabled"),
            Self::CustomDoctype => f.write_str("custom DocType"),
            Self::VirtualDoctype => f.write_str("virtual DocType"),
            Self::ProtectedApp(app) => write!(f, "DocType belongs to core app `{app}`"),
            Self::MissingAppDirectory(path) => write!(f, "app path `{path}` does not exist"),
        }
    }
}
