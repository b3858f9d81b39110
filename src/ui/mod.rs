//! User interface module - progress lines for each completed step.

pub mod formatter;

pub use formatter::{
    display_error, display_latest, display_manual_push_instruction, display_status,
    display_success,
};

use crate::bumper::BumpReporter;
use crate::domain::ModulePrefix;
use crate::resolver::ModuleRelease;

/// Prints a confirmation line for every completed bump step.
pub struct ConsoleReporter;

impl BumpReporter for ConsoleReporter {
    fn latest_resolved(&self, prefix: &ModulePrefix, latest: Option<&ModuleRelease>) {
        display_latest(prefix, latest);
    }

    fn tag_created(&self, tag: &str) {
        display_success(&format!("create tag {}", tag));
    }

    fn tag_pushed(&self, tag: &str, _remote: &str) {
        display_success(&format!("push tag {}", tag));
    }
}
