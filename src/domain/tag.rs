use crate::domain::Version;
use crate::error::{GumpError, Result};
use std::fmt;
use std::path::{Component, Path};

/// Namespace of one module's tags inside a shared repository tag list.
///
/// Stored without a trailing separator; the empty prefix is the
/// repository root. Matching always happens against `"<prefix>/"` so that
/// `a/b` never claims tags belonging to `a/bc`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModulePrefix {
    path: String,
}

impl ModulePrefix {
    /// Create a prefix from a raw, possibly slash-terminated path.
    ///
    /// `"."` and `""` both denote the repository root.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim_end_matches('/');
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        let path = if trimmed == "." { "" } else { trimmed };
        ModulePrefix {
            path: path.to_string(),
        }
    }

    pub fn root() -> Self {
        ModulePrefix::default()
    }

    /// Derive the prefix of the module rooted at `module_dir` inside the
    /// repository rooted at `repo_dir`.
    ///
    /// Both paths are canonicalised first, so relative paths and symlinks
    /// resolve the same way for the lookup and for the new tag name.
    pub fn from_paths(repo_dir: &Path, module_dir: &Path) -> Result<Self> {
        let repo_abs = repo_dir.canonicalize().map_err(|e| {
            GumpError::module_path(format!("cannot resolve {}: {}", repo_dir.display(), e))
        })?;
        let module_abs = module_dir.canonicalize().map_err(|e| {
            GumpError::module_path(format!("cannot resolve {}: {}", module_dir.display(), e))
        })?;

        let relative = module_abs.strip_prefix(&repo_abs).map_err(|_| {
            GumpError::module_path(format!(
                "{} is not inside repository {}",
                module_abs.display(),
                repo_abs.display()
            ))
        })?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        GumpError::module_path(format!(
                            "{} is not valid UTF-8",
                            relative.display()
                        ))
                    })?;
                    segments.push(part);
                }
                Component::CurDir => {}
                _ => {
                    return Err(GumpError::module_path(format!(
                        "unexpected component in {}",
                        relative.display()
                    )))
                }
            }
        }

        Ok(ModulePrefix {
            path: segments.join("/"),
        })
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// The prefix without a trailing separator ("" for the root).
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The prefix with its namespace boundary, e.g. `"a/b/"`.
    pub fn namespace(&self) -> Option<String> {
        if self.is_root() {
            None
        } else {
            Some(format!("{}/", self.path))
        }
    }

    /// Strip this prefix from a tag name, returning the version part.
    ///
    /// Returns `None` when the tag belongs to another namespace. The root
    /// prefix keeps every tag name unmodified.
    pub fn strip<'a>(&self, tag_name: &'a str) -> Option<&'a str> {
        if self.is_root() {
            return Some(tag_name);
        }
        tag_name
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }

    /// Format the tag name for `version` in this namespace:
    /// `<prefix>/v<version>`, or `v<version>` at the root.
    pub fn tag_name(&self, version: &Version) -> String {
        if self.is_root() {
            format!("v{}", version)
        } else {
            format!("{}/v{}", self.path, version)
        }
    }

    /// Parse a tag name back into a version if it belongs to this namespace.
    pub fn parse_tag(&self, tag_name: &str) -> Option<Version> {
        self.strip(tag_name).and_then(Version::parse_tag)
    }
}

impl fmt::Display for ModulePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.path)
        }
    }
}
