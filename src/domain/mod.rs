//! Domain logic - pure versioning rules independent of git operations

pub mod tag;
pub mod version;

pub use tag::ModulePrefix;
pub use version::{BumpKind, Version};
