//! Main workflow orchestration logic
//!
//! One invocation resolves the module prefix, finds the latest version in
//! that namespace, and creates (and optionally pushes) the next tag. The
//! same prefix value feeds both the lookup and the new tag name.

use std::path::PathBuf;

use tracing::debug;

use crate::bumper::{bump_and_publish, BumpPlan, BumpReporter};
use crate::config::{load_config, Config};
use crate::domain::{BumpKind, ModulePrefix, Version};
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::resolver::{find_latest_release, ModuleRelease};

/// Arguments for the bump workflow
///
/// Mirrors the CLI flags but in a format suitable for orchestration logic,
/// so the workflow can be called programmatically without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Repository root
    pub git_dir: PathBuf,

    /// Module root; its path relative to `git_dir` is the tag prefix
    pub module_dir: PathBuf,

    /// Explicit bump kind; falls back to the configured default
    pub bump: Option<BumpKind>,

    /// Push the new tag even if the configuration does not ask for it
    pub push: bool,

    /// Remote to push to; falls back to the configured remote
    pub remote: Option<String>,

    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Compute the next tag without creating or pushing it
    pub dry_run: bool,
}

impl BumpWorkflowArgs {
    pub fn new(git_dir: impl Into<PathBuf>, module_dir: impl Into<PathBuf>) -> Self {
        BumpWorkflowArgs {
            git_dir: git_dir.into(),
            module_dir: module_dir.into(),
            bump: None,
            push: false,
            remote: None,
            config_path: None,
            dry_run: false,
        }
    }
}

/// Flags and configuration merged into the values one run uses.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpSettings {
    pub kind: BumpKind,
    /// Remote that receives the tag when `push` is set
    pub remote: String,
    pub push: bool,
    pub dry_run: bool,
}

impl BumpSettings {
    /// Command-line flags win over the configuration file.
    pub fn resolve(args: &BumpWorkflowArgs, config: &Config) -> Result<Self> {
        let kind = match args.bump {
            Some(kind) => kind,
            None => config.default_bump_kind()?,
        };

        Ok(BumpSettings {
            kind,
            remote: args
                .remote
                .clone()
                .unwrap_or_else(|| config.remote.name.clone()),
            push: args.push || config.behavior.push,
            dry_run: args.dry_run,
        })
    }

    fn push_remote(&self) -> Option<&str> {
        self.push.then_some(self.remote.as_str())
    }
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was created (or would be, on a dry run)
    pub tag: String,

    /// Version the bump started from
    pub previous: Version,

    /// Version carried by `tag`
    pub version: Version,

    /// Remote the tag is published to
    pub remote: String,

    /// The tag was pushed (or would be, on a dry run)
    pub pushed: bool,

    /// Nothing was written to the repository
    pub dry_run: bool,
}

/// Run the bump workflow against the repository at `args.git_dir`.
pub fn run_bump_workflow<P: BumpReporter + ?Sized>(
    args: &BumpWorkflowArgs,
    reporter: &P,
) -> Result<WorkflowResult> {
    let config = load_config(args.config_path.as_deref(), &args.git_dir)?;
    let settings = BumpSettings::resolve(args, &config)?;

    let repo = Git2Repository::open(&args.git_dir)?;
    let prefix = ModulePrefix::from_paths(&args.git_dir, &args.module_dir)?;
    debug!(prefix = %prefix, kind = %settings.kind, "starting bump");

    execute_bump(&repo, &prefix, &settings, reporter)
}

/// Resolve, bump and optionally push against any repository backend.
pub fn execute_bump<R, P>(
    repo: &R,
    prefix: &ModulePrefix,
    settings: &BumpSettings,
    reporter: &P,
) -> Result<WorkflowResult>
where
    R: Repository + ?Sized,
    P: BumpReporter + ?Sized,
{
    let latest: Option<ModuleRelease> = find_latest_release(repo, prefix)?;
    reporter.latest_resolved(prefix, latest.as_ref());

    let previous = latest
        .map(|release| release.version)
        .unwrap_or_else(Version::zero);

    let plan = BumpPlan::new(&previous, settings.kind, prefix)?;
    let tag = if settings.dry_run {
        plan.tag
    } else {
        bump_and_publish(
            repo,
            &previous,
            settings.kind,
            prefix,
            settings.push_remote(),
            reporter,
        )?
    };

    Ok(WorkflowResult {
        version: plan.next,
        tag,
        previous,
        remote: settings.remote.clone(),
        pushed: settings.push,
        dry_run: settings.dry_run,
    })
}
