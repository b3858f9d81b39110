use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use gump::cli::orchestration::{run_bump_workflow, BumpWorkflowArgs};
use gump::domain::BumpKind;
use gump::ui::{self, ConsoleReporter};

#[derive(clap::Parser)]
#[command(
    name = "gump",
    version,
    about = "Bump up the semantic-version git tag of a (sub)module"
)]
struct Args {
    #[arg(short, long, default_value = ".", help = "Repository root (the .git directory)")]
    git_dir: PathBuf,

    #[arg(
        short = 'm',
        long = "gomod-dir",
        default_value = ".",
        help = "Module root; its path inside the repository prefixes the tag"
    )]
    module_dir: PathBuf,

    #[arg(short, long, help = "Push the new tag")]
    push: bool,

    #[arg(long, help = "Increment major version")]
    major: bool,

    #[arg(long, help = "Increment minor version")]
    minor: bool,

    #[arg(long, help = "Increment patch version (default)")]
    patch: bool,

    #[arg(short, long, help = "Remote to push to [default: origin]")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview the next tag without creating or pushing it")]
    dry_run: bool,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "More log output (-v debug, -vv trace)"
    )]
    verbose: u8,

    #[arg(short, long, help = "Only log errors")]
    quiet: bool,
}

impl Args {
    /// Explicit bump flags, or `None` so the configured default applies.
    fn bump_kind(&self) -> Option<BumpKind> {
        if !(self.major || self.minor || self.patch) {
            return None;
        }
        if [self.major, self.minor, self.patch]
            .iter()
            .filter(|set| **set)
            .count()
            > 1
        {
            warn!("several bump flags given, using the highest");
        }
        Some(BumpKind::from_flags(self.major, self.minor, self.patch))
    }
}

fn env_filter(quiet: bool, verbose: u8) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(args.quiet, args.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let workflow_args = BumpWorkflowArgs {
        git_dir: args.git_dir.clone(),
        module_dir: args.module_dir.clone(),
        bump: args.bump_kind(),
        push: args.push,
        remote: args.remote.clone(),
        config_path: args.config.clone(),
        dry_run: args.dry_run,
    };

    let result = match run_bump_workflow(&workflow_args, &ConsoleReporter) {
        Ok(result) => result,
        Err(e) => {
            let location = workflow_args.git_dir.display();
            ui::display_error(&format!("failed to bump tag in {}: {}", location, e));
            std::process::exit(1);
        }
    };

    if result.dry_run {
        ui::display_status(&format!("would create tag {}", result.tag));
        if result.pushed {
            ui::display_status(&format!("would push tag {} to {}", result.tag, result.remote));
        }
    } else if !result.pushed {
        ui::display_manual_push_instruction(&result.tag, &result.remote);
    }

    Ok(())
}
