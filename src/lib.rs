pub mod bumper;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod resolver;
pub mod ui;

pub use bumper::{bump_and_publish, BumpPlan, BumpReporter};
pub use domain::{BumpKind, ModulePrefix, Version};
pub use error::{GumpError, Result};
pub use resolver::{find_latest_release, resolve_latest_version};
