mod common;

use common::{add_bare_origin, commit_file, setup_test_repo, tag, tag_names};
use git2::Repository;
use std::path::Path;
use std::process::{Command, Output};

fn gump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gump"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute gump")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

#[test]
fn test_gump_help() {
    let output = gump(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("gump"));
    assert!(stdout.contains("--gomod-dir"));
    assert!(stdout.contains("--push"));
}

#[test]
fn test_gump_version() {
    let output = gump(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_creates_module_tag() {
    let (dir, _) = setup_test_repo();
    let repo = Repository::open(dir.path()).unwrap();
    commit_file(&repo, dir.path(), "tools/ops/go.mod", "add ops module");
    let module = dir.path().join("tools/ops");

    let output = gump(&["--git-dir", path_str(dir.path()), "--gomod-dir", path_str(&module)]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("latest tools/ops version: 0.0.0"), "{}", stdout);
    assert!(stdout.contains("create tag tools/ops/v0.0.1"), "{}", stdout);
    assert!(!stdout.contains("push tag"));
    assert_eq!(tag_names(&repo), vec!["tools/ops/v0.0.1"]);
}

#[test]
fn test_major_flag_wins() {
    let (dir, head) = setup_test_repo();
    let repo = Repository::open(dir.path()).unwrap();
    tag(&repo, "v1.1.0", head);

    let output = gump(&[
        "-g",
        path_str(dir.path()),
        "--major",
        "--minor",
        "--patch",
    ]);

    assert!(output.status.success(), "{:?}", output);
    assert_eq!(tag_names(&repo), vec!["v1.1.0", "v2.0.0"]);
}

#[test]
fn test_push_reports_both_steps() {
    let (dir, _) = setup_test_repo();
    let repo = Repository::open(dir.path()).unwrap();
    let remote_dir = add_bare_origin(&repo);

    let output = gump(&["--git-dir", path_str(dir.path()), "--push", "--minor"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("create tag v0.1.0"), "{}", stdout);
    assert!(stdout.contains("push tag v0.1.0"), "{}", stdout);

    let remote = Repository::open_bare(remote_dir.path()).unwrap();
    assert_eq!(tag_names(&remote), vec!["v0.1.0"]);
}

#[test]
fn test_empty_repository_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    Repository::init(dir.path()).unwrap();

    let output = gump(&["--git-dir", path_str(dir.path())]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ERROR:"), "{}", stderr);
    assert!(stderr.contains("Cannot resolve HEAD"), "{}", stderr);
}

#[test]
fn test_dry_run_starts_from_highest_release() {
    let (dir, head) = setup_test_repo();
    let repo = Repository::open(dir.path()).unwrap();
    tag(&repo, "v0.0.1", head);
    tag(&repo, "v0.0.2-rc.1", head);
    let newer = commit_file(&repo, dir.path(), "CHANGELOG.md", "changelog");
    tag(&repo, "v0.0.2", newer);

    let output = gump(&["--git-dir", path_str(dir.path()), "--dry-run"]);
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("would create tag v0.0.3"), "{}", stdout);
    assert_eq!(tag_names(&repo), vec!["v0.0.1", "v0.0.2", "v0.0.2-rc.1"]);
}

#[test]
fn test_dry_run_with_push() {
    let (dir, _) = setup_test_repo();

    let output = gump(&["--git-dir", path_str(dir.path()), "--dry-run", "--push"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("would create tag v0.0.1"), "{}", stdout);
    assert!(stdout.contains("would push tag v0.0.1 to origin"), "{}", stdout);
    let repo = Repository::open(dir.path()).unwrap();
    assert!(tag_names(&repo).is_empty());
}
