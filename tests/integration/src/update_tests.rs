//! End-to-end tests for updating existing plugin clones.
//!
//! Each test clones a generated fixture remote, mutates the clone or the
//! remote, and asserts on the update summary and the resulting tree.

use plugin_git::PluginRepo;
use plugin_test_utils::plugin::PluginFixture;
use plugin_test_utils::rev;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn cloned_fixture() -> (PluginFixture, PluginRepo) {
    plugin_test_utils::init_tracing();
    let fixture = PluginFixture::new();
    let repo = PluginRepo::new(fixture.clone_dir());
    repo.clone_repo(&fixture.remote_url(), "").unwrap();
    (fixture, repo)
}

#[test]
fn update_is_idempotent_when_nothing_changed() {
    let (_fixture, repo) = cloned_fixture();

    let first = repo.update("").unwrap();
    let second = repo.update("").unwrap();

    assert_eq!(first.ref_label, second.ref_label);
    assert_eq!(second.previous, second.current);
}

#[test]
fn update_restores_a_rewound_clone() {
    let (fixture, repo) = cloned_fixture();
    let latest = rev::resolve(fixture.remote_path(), "master");

    let parent = rev::rewind_to_parent(&fixture.clone_dir());
    assert_ne!(parent, latest);

    let summary = repo.update("").unwrap();

    assert_eq!(summary.ref_label, "refs/heads/master");
    assert_eq!(summary.previous.as_str(), parent);
    assert_eq!(summary.current.as_str(), latest);
    assert_eq!(repo.head().unwrap().as_str(), latest);
}

#[test]
fn update_fetches_new_remote_commits() {
    let (fixture, repo) = cloned_fixture();

    fixture.add_remote_commit("NOTICE", "new upstream content\n");
    let latest = rev::resolve(fixture.remote_path(), "master");

    let summary = repo.update("").unwrap();

    assert_eq!(summary.ref_label, "refs/heads/master");
    assert_eq!(summary.current.as_str(), latest);
    assert!(fixture.clone_dir().join("NOTICE").is_file());
}

#[test]
fn update_preserves_untracked_files() {
    let (fixture, repo) = cloned_fixture();
    let latest = rev::resolve(fixture.remote_path(), "master");

    rev::rewind_to_parent(&fixture.clone_dir());

    let untracked_dir = fixture.clone_dir().join("untracked");
    fs::create_dir(&untracked_dir).unwrap();
    let expected = b"dummy_content".to_vec();
    fs::write(untracked_dir.join("file_one"), &expected).unwrap();
    fs::write(untracked_dir.join("file_two"), &expected).unwrap();

    let summary = repo.update("").unwrap();

    assert_eq!(summary.ref_label, "refs/heads/master");
    assert_eq!(repo.head().unwrap().as_str(), latest);
    assert_eq!(fs::read(untracked_dir.join("file_one")).unwrap(), expected);
    assert_eq!(fs::read(untracked_dir.join("file_two")).unwrap(), expected);
}

#[test]
fn update_to_explicit_ref_uses_bare_label() {
    let (fixture, repo) = cloned_fixture();
    let expected = rev::resolve(fixture.remote_path(), "master");

    let summary = repo.update("master").unwrap();

    assert_eq!(summary.ref_label, "master");
    assert_eq!(summary.current.as_str(), expected);
    assert_eq!(repo.head().unwrap().as_str(), expected);
}

#[test]
fn update_to_annotated_tag_resolves_the_tagged_commit() {
    let (fixture, repo) = cloned_fixture();
    fixture.add_remote_tag("v1");
    let tagged = rev::resolve(fixture.remote_path(), "v1^{commit}");

    rev::rewind_to_parent(&fixture.clone_dir());

    let summary = repo.update("v1").unwrap();

    assert_eq!(summary.ref_label, "v1");
    assert_eq!(summary.current.as_str(), tagged);
    assert_eq!(repo.head().unwrap().as_str(), tagged);
}

#[test]
fn update_to_annotated_tag_is_a_noop_when_already_current() {
    let (fixture, repo) = cloned_fixture();
    fixture.add_remote_tag("v1");

    rev::rewind_to_parent(&fixture.clone_dir());
    repo.update("v1").unwrap();

    // The tag object id differs from the commit id; a second update must
    // still recognise the clone as current and leave the tree alone.
    let second = repo.update("v1").unwrap();

    assert_eq!(second.ref_label, "v1");
    assert_eq!(second.previous, second.current);
    assert_eq!(
        second.current.as_str(),
        rev::resolve(fixture.remote_path(), "v1^{commit}")
    );
}

#[test]
fn update_reports_unknown_remote_ref() {
    let (_fixture, repo) = cloned_fixture();

    let err = repo.update("non-existent").unwrap_err();

    let msg = err.to_string();
    assert!(
        msg.contains("couldn't find remote ref non-existent"),
        "got: {msg}"
    );
}

#[test]
fn update_reports_missing_directory() {
    let temp = TempDir::new().unwrap();
    let repo = PluginRepo::new(temp.path().join("nonexistent"));

    let err = repo.update("").unwrap_err();

    let msg = err.to_string().to_lowercase();
    assert!(msg.contains("no such file or directory"), "got: {msg}");
}

#[test]
fn update_reports_non_repository_directory() {
    let temp = TempDir::new().unwrap();
    let repo = PluginRepo::new(temp.path());

    let err = repo.update("").unwrap_err();

    assert!(
        err.to_string().contains("not a git repository"),
        "got: {err}"
    );
}

#[test]
fn changelog_lists_commits_gained_by_an_update() {
    let (fixture, repo) = cloned_fixture();

    fixture.add_remote_commit("NOTICE", "new upstream content\n");
    let summary = repo.update("").unwrap();
    assert_ne!(summary.previous, summary.current);

    let commits = repo
        .changelog(&summary.previous, &summary.current)
        .unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "Add NOTICE");
    assert_eq!(commits[0].author, "Test User");
}
