#![allow(dead_code)]

use git2::{Oid, Repository};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary repository with one commit touching `README.md`.
pub fn setup_test_repo() -> (TempDir, Oid) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let oid = commit_file(&repo, temp_dir.path(), "README.md", "Initial commit");
    (temp_dir, oid)
}

/// Write `path` inside the work tree and commit it on HEAD.
pub fn commit_file(repo: &Repository, workdir: &Path, path: &str, message: &str) -> Oid {
    let full_path = workdir.join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).expect("Could not create parent dir");
    }
    fs::write(&full_path, format!("{}\n", message)).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(path))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

/// Create a lightweight tag at `oid`.
pub fn tag(repo: &Repository, name: &str, oid: Oid) {
    let object = repo.find_object(oid, None).expect("Could not find object");
    repo.tag_lightweight(name, &object, false)
        .expect("Could not create tag");
}

/// Attach a bare repository as the `origin` remote of `repo`.
pub fn add_bare_origin(repo: &Repository) -> TempDir {
    let remote_dir = TempDir::new().expect("Could not create remote dir");
    Repository::init_bare(remote_dir.path()).expect("Could not init bare repo");
    repo.remote(
        "origin",
        remote_dir.path().to_str().expect("temp path is UTF-8"),
    )
    .expect("Could not add remote");
    remote_dir
}

/// Push an existing local tag to `origin` with plain git2.
pub fn push_tag(repo: &Repository, name: &str) {
    let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
    repo.find_remote("origin")
        .expect("Could not find origin")
        .push(&[refspec.as_str()], None)
        .expect("Could not push tag");
}

/// Commit a tag points at, peeling annotated tags.
pub fn tag_target(repo: &Repository, name: &str) -> Oid {
    repo.revparse_single(&format!("refs/tags/{}", name))
        .and_then(|object| object.peel_to_commit())
        .expect("Could not resolve tag")
        .id()
}

/// Short names of every tag in `repo`, sorted.
pub fn tag_names(repo: &Repository) -> Vec<String> {
    let mut names: Vec<String> = repo
        .tag_names(None)
        .expect("Could not list tags")
        .iter()
        .flatten()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    names.sort();
    names
}
