use crate::error::{GumpError, Result};
use crate::git::{tag_ref_name, Repository, TagRef, TAG_REF_PREFIX};
use git2::Oid;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory repository for testing without actual git operations
///
/// Tags live in a map keyed by short name, so duplicate creation is
/// rejected exactly like a real repository. Pushes are recorded as
/// `(remote, ref_name)` pairs.
pub struct MockRepository {
    tags: RefCell<BTreeMap<String, Oid>>,
    head: Option<Oid>,
    remotes: Vec<String>,
    pushed: RefCell<Vec<(String, String)>>,
    tag_listing_error: Option<String>,
    push_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository with an `origin` remote and no commits
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(BTreeMap::new()),
            head: None,
            remotes: vec!["origin".to_string()],
            pushed: RefCell::new(Vec::new()),
            tag_listing_error: None,
            push_error: None,
        }
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Set the commit HEAD resolves to
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    pub fn set_remotes(&mut self, remotes: &[&str]) {
        self.remotes = remotes.iter().map(|r| r.to_string()).collect();
    }

    /// Make tag enumeration fail with the given message
    pub fn fail_tag_listing(&mut self, msg: impl Into<String>) {
        self.tag_listing_error = Some(msg.into());
    }

    /// Make every push fail with the given message
    pub fn fail_push(&mut self, msg: impl Into<String>) {
        self.push_error = Some(msg.into());
    }

    /// Target of a tag, by short name
    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        self.tags.borrow().get(name).copied()
    }

    /// References pushed so far, as `(remote, ref_name)`
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        if let Some(msg) = &self.tag_listing_error {
            return Err(GumpError::repository_access(msg.clone()));
        }
        Ok(self
            .tags
            .borrow()
            .iter()
            .map(|(name, oid)| TagRef::new(tag_ref_name(name), *oid))
            .collect())
    }

    fn head_oid(&self) -> Result<Oid> {
        self.head
            .ok_or_else(|| GumpError::head_resolution("reference 'refs/heads/main' not found"))
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(GumpError::tag_exists(name));
        }
        tags.insert(name.to_string(), oid);
        Ok(())
    }

    fn push_ref(&self, remote: &str, ref_name: &str) -> Result<()> {
        let tag = ref_name.strip_prefix(TAG_REF_PREFIX).unwrap_or(ref_name);

        if !self.remotes.iter().any(|r| r == remote) {
            return Err(GumpError::push(tag, remote, "cannot find remote"));
        }
        if let Some(msg) = &self.push_error {
            return Err(GumpError::push(tag, remote, msg.clone()));
        }
        if !self.tags.borrow().contains_key(tag) {
            return Err(GumpError::push(tag, remote, "src refspec does not match any"));
        }

        self.pushed
            .borrow_mut()
            .push((remote.to_string(), ref_name.to_string()));
        Ok(())
    }
}
