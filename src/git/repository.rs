use crate::error::{GumpError, Result};
use crate::git::{TagRef, TAG_REF_PREFIX};
use git2::{
    Config, Cred, CredentialType, Direction, ErrorCode, Oid, RemoteCallbacks,
    Repository as Git2Repo,
};
use std::path::Path;
use tracing::{debug, trace};

/// How many times libgit2 may ask for credentials before the push gives up.
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Peel a tag reference target down to the commit it names.
    ///
    /// Annotated tags point at a tag object; lightweight tags point at the
    /// commit directly. Targets that are not commits are kept as-is.
    fn peel_to_commit_id(&self, oid: Oid) -> Oid {
        self.repo
            .find_object(oid, None)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .unwrap_or(oid)
    }
}

impl super::Repository for Git2Repository {
    fn tag_refs(&self) -> Result<Vec<TagRef>> {
        let mut raw = Vec::new();
        self.repo
            .tag_foreach(|oid, name| {
                match std::str::from_utf8(name) {
                    Ok(name) => raw.push((name.to_string(), oid)),
                    Err(_) => trace!("skipping tag with non UTF-8 name"),
                }
                true
            })
            .map_err(|e| GumpError::repository_access(e.message().to_string()))?;

        let tags: Vec<TagRef> = raw
            .into_iter()
            .map(|(name, oid)| TagRef::new(name, self.peel_to_commit_id(oid)))
            .collect();

        debug!(count = tags.len(), "enumerated tag references");
        Ok(tags)
    }

    fn head_oid(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|e| GumpError::head_resolution(e.message().to_string()))?;

        let commit = head
            .peel_to_commit()
            .map_err(|e| GumpError::head_resolution(e.message().to_string()))?;

        Ok(commit.id())
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let object = self.repo.find_object(oid, None)?;

        match self.repo.tag_lightweight(name, &object, false) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Exists => Err(GumpError::tag_exists(name)),
            Err(e) => Err(e.into()),
        }
    }

    fn push_ref(&self, remote_name: &str, ref_name: &str) -> Result<()> {
        let tag = ref_name.strip_prefix(TAG_REF_PREFIX).unwrap_or(ref_name);
        let push_error = |reason: String| GumpError::push(tag, remote_name, reason);

        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|e| push_error(format!("cannot find remote: {}", e.message())))?;
        let config = self.repo.config()?;
        let local_oid = self
            .repo
            .refname_to_id(ref_name)
            .map_err(|e| push_error(format!("no local {}: {}", ref_name, e.message())))?;

        // libgit2 happily moves a remote tag, so check what the remote advertises first
        let advertised = {
            let connection = remote
                .connect_auth(Direction::Push, Some(credential_callbacks(&config)), None)
                .map_err(|e| push_error(describe_push_error(&e)))?;
            let heads = connection
                .list()
                .map_err(|e| push_error(describe_push_error(&e)))?;
            let found = heads
                .iter()
                .find(|head| head.name() == ref_name)
                .map(|head| head.oid());
            found
        };
        match advertised {
            Some(oid) if oid != local_oid => {
                return Err(push_error("tag already exists on remote".to_string()));
            }
            Some(_) => debug!(remote = remote_name, tag, "remote already has this tag"),
            None => {}
        }

        let mut callbacks = credential_callbacks(&config);
        // A remote-side rejection arrives here rather than as a push error
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("{0}:{0}", ref_name);
        debug!(remote = remote_name, refspec = %refspec, "pushing reference");

        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| push_error(describe_push_error(&e)))
    }
}

/// Credential chain for remote operations: SSH agent, `~/.ssh` keys, the
/// configured credential helper, then libgit2 defaults.
fn credential_callbacks(config: &Config) -> RemoteCallbacks<'_> {
    let mut attempts = 0;
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                if attempts == 1 {
                    return Ok(cred);
                }
            }

            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(cred) = Cred::credential_helper(config, url, username_from_url) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

fn describe_push_error(e: &git2::Error) -> String {
    match e.class() {
        git2::ErrorClass::Net => format!("network error: {}", e.message()),
        git2::ErrorClass::Reference => format!("reference error: {}", e.message()),
        _ => e.message().to_string(),
    }
}
