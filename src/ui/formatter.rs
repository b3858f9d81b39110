//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build styled lines; the `display_*` functions
//! print them. Styling is dropped automatically when the stream is not a
//! terminal.

use console::style;

use crate::domain::{ModulePrefix, Version};
use crate::resolver::ModuleRelease;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Describe the release a bump starts from.
pub fn format_latest(prefix: &ModulePrefix, latest: Option<&ModuleRelease>) -> String {
    match latest {
        Some(release) => format_status(&format!(
            "latest {} version: {} ({})",
            prefix,
            style(&release.version).cyan(),
            release.tag
        )),
        None => format_status(&format!(
            "latest {} version: {}",
            prefix,
            style(Version::zero()).cyan()
        )),
    }
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

pub fn display_latest(prefix: &ModulePrefix, latest: Option<&ModuleRelease>) {
    println!("{}", format_latest(prefix, latest));
}

/// Display manual push instruction for a tag.
///
/// Shows the git command needed to push the tag to a remote.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "{}\n  {}",
        format_status("To push this tag later, run:"),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
