//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of
//! repository capabilities gump needs, so the version logic can run
//! against a real repository or an in-memory fake.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use gump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gump::Result<()> {
//! let head = repo.head_oid()?;
//! repo.create_tag("tools/v0.1.0", head)?;
//! repo.push_ref("origin", "refs/tags/tools/v0.1.0")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Namespace under which git stores tag references.
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// A tag reference as enumerated from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Full reference name, e.g. `refs/tags/a/b/v1.0.0`
    pub name: String,
    /// Commit the tag points to (annotated tags are peeled)
    pub target: Oid,
}

impl TagRef {
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        TagRef {
            name: name.into(),
            target,
        }
    }

    /// The tag name without the `refs/tags/` namespace.
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix(TAG_REF_PREFIX)
            .unwrap_or(&self.name)
    }
}

/// Full reference name for a tag.
pub fn tag_ref_name(tag: &str) -> String {
    format!("{}{}", TAG_REF_PREFIX, tag)
}

/// Repository capabilities needed to bump a module version
///
/// ## Error Handling
///
/// Implementations map backend failures to the matching
/// [crate::error::GumpError] category: tag enumeration failures are
/// `RepositoryAccess`, a missing HEAD is `HeadResolution`, duplicate tag
/// names are `TagAlreadyExists`, and transport failures are `Push`.
pub trait Repository {
    /// Enumerate every tag reference in the repository.
    fn tag_refs(&self) -> Result<Vec<TagRef>>;

    /// Resolve the current branch head to a commit.
    ///
    /// Fails with `HeadResolution` when there is nothing to tag, e.g. in
    /// a repository without commits.
    fn head_oid(&self) -> Result<Oid>;

    /// Create a lightweight tag `name` pointing at `oid`.
    ///
    /// Never overwrites: an existing tag of the same name is a
    /// `TagAlreadyExists` error.
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;

    /// Push exactly one reference to `remote`.
    ///
    /// # Example
    /// ```rust
    /// # use gump::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> gump::Result<()> {
    /// repo.push_ref("origin", "refs/tags/v1.0.0")?;
    /// # Ok(())
    /// # }
    /// ```
    fn push_ref(&self, remote: &str, ref_name: &str) -> Result<()>;
}
