use thiserror::Error;

/// Unified error type for gump operations
#[derive(Error, Debug)]
pub enum GumpError {
    #[error("Cannot read repository tags: {0}")]
    RepositoryAccess(String),

    #[error("Cannot resolve HEAD: {0}")]
    HeadResolution(String),

    #[error("Tag '{tag}' already exists")]
    TagAlreadyExists { tag: String },

    #[error("Failed to push tag '{tag}' to '{remote}': {reason}")]
    Push {
        tag: String,
        remote: String,
        reason: String,
    },

    #[error("Version error: {0}")]
    Version(String),

    #[error("Invalid module path: {0}")]
    ModulePath(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gump
pub type Result<T> = std::result::Result<T, GumpError>;

impl GumpError {
    /// Create a repository access error with context
    pub fn repository_access(msg: impl Into<String>) -> Self {
        GumpError::RepositoryAccess(msg.into())
    }

    /// Create a head resolution error with context
    pub fn head_resolution(msg: impl Into<String>) -> Self {
        GumpError::HeadResolution(msg.into())
    }

    pub fn tag_exists(tag: impl Into<String>) -> Self {
        GumpError::TagAlreadyExists { tag: tag.into() }
    }

    /// Create a push error for a single tag
    pub fn push(
        tag: impl Into<String>,
        remote: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        GumpError::Push {
            tag: tag.into(),
            remote: remote.into(),
            reason: reason.into(),
        }
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GumpError::Version(msg.into())
    }

    /// Create a module path error with context
    pub fn module_path(msg: impl Into<String>) -> Self {
        GumpError::ModulePath(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GumpError::Config(msg.into())
    }
}
