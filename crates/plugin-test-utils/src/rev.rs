//! Revision helpers for asserting on repository state in tests.

use std::path::Path;

use git2::{Repository, ResetType};

/// Resolve `spec` (e.g. `HEAD`, `HEAD~`, a branch name) to a full hex id.
///
/// # Panics
/// Panics if the repository cannot be opened or the spec does not resolve.
pub fn resolve(path: &Path, spec: &str) -> String {
    let repo = Repository::open(path).unwrap_or_else(|e| {
        panic!("resolve: failed to open repository at {}: {e}", path.display())
    });
    let object = repo
        .revparse_single(spec)
        .unwrap_or_else(|e| panic!("resolve: failed to resolve '{spec}': {e}"));
    object.id().to_string()
}

/// Hard-reset the repository one commit back, leaving the clone behind its
/// remote. Returns the new tip id.
///
/// # Panics
/// Panics if the repository has no parent commit to rewind to.
pub fn rewind_to_parent(path: &Path) -> String {
    let repo = Repository::open(path).unwrap_or_else(|e| {
        panic!(
            "rewind_to_parent: failed to open repository at {}: {e}",
            path.display()
        )
    });
    let parent = repo
        .revparse_single("HEAD~")
        .unwrap_or_else(|e| panic!("rewind_to_parent: failed to resolve HEAD~: {e}"));
    repo.reset(&parent, ResetType::Hard, None)
        .unwrap_or_else(|e| panic!("rewind_to_parent: reset failed: {e}"));
    parent.id().to_string()
}
