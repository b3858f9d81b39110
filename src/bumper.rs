//! Next-version computation and tag publication.

use crate::domain::{BumpKind, ModulePrefix, Version};
use crate::error::Result;
use crate::git::{tag_ref_name, Repository};
use crate::resolver::ModuleRelease;
use tracing::{debug, info};

/// The tag a bump would create, computed without touching the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpPlan {
    pub current: Version,
    pub next: Version,
    pub kind: BumpKind,
    pub tag: String,
}

impl BumpPlan {
    /// Fails with `GumpError::Version` when the bumped component would overflow.
    pub fn new(current: &Version, kind: BumpKind, prefix: &ModulePrefix) -> Result<Self> {
        let next = current.bump(kind)?;
        let tag = prefix.tag_name(&next);
        Ok(BumpPlan {
            current: current.clone(),
            next,
            kind,
            tag,
        })
    }
}

/// Receives the observable steps of a bump as they complete.
pub trait BumpReporter {
    /// Called once the starting version is known, before anything is created.
    fn latest_resolved(&self, _prefix: &ModulePrefix, _latest: Option<&ModuleRelease>) {}

    fn tag_created(&self, tag: &str);
    fn tag_pushed(&self, tag: &str, remote: &str);
}

/// Reporter that discards every event.
pub struct SilentReporter;

impl BumpReporter for SilentReporter {
    fn tag_created(&self, _tag: &str) {}
    fn tag_pushed(&self, _tag: &str, _remote: &str) {}
}

/// Create the next tag for `prefix` at HEAD and optionally push it.
///
/// `push_remote` names the remote to push to; `None` keeps the tag local.
/// Only the new tag is pushed. If the push fails the local tag stays in
/// place and the push error is returned.
///
/// # Returns
/// * `Ok(tag)` - The created tag name
/// * `Err` - `Version`, `HeadResolution`, `TagAlreadyExists` or `Push`
pub fn bump_and_publish<R, P>(
    repo: &R,
    current: &Version,
    kind: BumpKind,
    prefix: &ModulePrefix,
    push_remote: Option<&str>,
    reporter: &P,
) -> Result<String>
where
    R: Repository + ?Sized,
    P: BumpReporter + ?Sized,
{
    let plan = BumpPlan::new(current, kind, prefix)?;
    debug!(current = %plan.current, next = %plan.next, kind = %kind, "computed next version");

    let head = repo.head_oid()?;
    repo.create_tag(&plan.tag, head)?;
    info!(tag = %plan.tag, commit = %head, "created tag");
    reporter.tag_created(&plan.tag);

    let Some(remote) = push_remote else {
        return Ok(plan.tag);
    };

    repo.push_ref(remote, &tag_ref_name(&plan.tag))?;
    info!(tag = %plan.tag, remote, "pushed tag");
    reporter.tag_pushed(&plan.tag, remote);

    Ok(plan.tag)
}
