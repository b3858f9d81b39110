//! Latest-version lookup for one module namespace.

use crate::domain::{ModulePrefix, Version};
use crate::error::Result;
use crate::git::Repository;
use tracing::debug;

/// A tag in a module's namespace together with its parsed version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRelease {
    pub tag: String,
    pub version: Version,
}

/// Find the highest-versioned tag in `prefix`'s namespace.
///
/// Tags outside the namespace and tags whose remainder is not a semantic
/// version are skipped. Among equal versions the last one enumerated wins.
/// Returns `Ok(None)` when the module has never been tagged.
pub fn find_latest_release<R: Repository + ?Sized>(
    repo: &R,
    prefix: &ModulePrefix,
) -> Result<Option<ModuleRelease>> {
    let tags = repo.tag_refs()?;

    let latest = tags
        .iter()
        .filter_map(|tag_ref| {
            let name = tag_ref.short_name();
            prefix.parse_tag(name).map(|version| ModuleRelease {
                tag: name.to_string(),
                version,
            })
        })
        .max_by(|a, b| a.version.cmp(&b.version));

    debug!(
        prefix = %prefix,
        scanned = tags.len(),
        latest = latest.as_ref().map(|r| r.tag.as_str()).unwrap_or("-"),
        "resolved latest module release"
    );
    Ok(latest)
}

/// Latest version for `prefix`, or `0.0.0` if the module has no tags.
pub fn resolve_latest_version<R: Repository + ?Sized>(
    repo: &R,
    prefix: &ModulePrefix,
) -> Result<Version> {
    Ok(find_latest_release(repo, prefix)?
        .map(|release| release.version)
        .unwrap_or_else(Version::zero))
}
