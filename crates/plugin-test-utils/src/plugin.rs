//! Generated plugin repositories for clone/update tests.
//!
//! A fixture is a real git repository on the local filesystem with a `bin/`
//! script directory and a multi-commit history on `master`. Tests point
//! clone and fetch operations at its path, so no network access is needed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Callback scripts a generated plugin ships in `bin/`.
pub const PLUGIN_SCRIPTS: &[&str] = &[
    "download",
    "install",
    "uninstall",
    "list-all",
    "latest-stable",
    "list-bin-paths",
    "exec-env",
    "help.overview",
    "help.deps",
    "help.links",
];

/// Generate a plugin repository at `parent/<name>`.
///
/// Specifically:
/// - Runs `git init` and configures `user.email`, `user.name`, and
///   `commit.gpgsign = false`
/// - Writes `README.md` and one script per [`PLUGIN_SCRIPTS`] entry under
///   `bin/`, then makes an initial commit
/// - Renames the default branch to `master`
/// - Adds a second commit so `HEAD~` exists for rewind scenarios
///
/// Returns the repository path.
///
/// # Panics
/// Panics if any git operation fails.
pub fn generate_plugin(name: &str, parent: &Path) -> PathBuf {
    let path = parent.join(name);
    fs::create_dir_all(&path)
        .unwrap_or_else(|e| panic!("generate_plugin: failed to create {}: {e}", path.display()));

    run_git(&path, &["init"]);
    run_git(&path, &["config", "user.email", "test@test.com"]);
    run_git(&path, &["config", "user.name", "Test User"]);
    run_git(&path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), format!("# {name}\n"))
        .unwrap_or_else(|e| panic!("generate_plugin: failed to write README.md: {e}"));

    let bin_dir = path.join("bin");
    fs::create_dir(&bin_dir)
        .unwrap_or_else(|e| panic!("generate_plugin: failed to create bin: {e}"));
    for script in PLUGIN_SCRIPTS {
        fs::write(
            bin_dir.join(script),
            format!("#!/usr/bin/env bash\necho {script}\n"),
        )
        .unwrap_or_else(|e| panic!("generate_plugin: failed to write bin/{script}: {e}"));
    }

    run_git(&path, &["add", "."]);
    run_git(&path, &["commit", "-m", "Initial commit"]);
    run_git(&path, &["branch", "-M", "master"]);

    // Second commit so tests can rewind to HEAD~.
    fs::write(path.join("VERSION"), "1.0.0\n")
        .unwrap_or_else(|e| panic!("generate_plugin: failed to write VERSION: {e}"));
    run_git(&path, &["add", "VERSION"]);
    run_git(&path, &["commit", "-m", "Add version file"]);

    path
}

/// A plugin "remote" in a temporary directory, plus a destination for its
/// local clone.
///
/// # Example
///
/// ```rust,no_run
/// use plugin_test_utils::plugin::PluginFixture;
///
/// let fixture = PluginFixture::new();
/// let url = fixture.remote_url();
/// let clone_dir = fixture.clone_dir();
/// ```
pub struct PluginFixture {
    temp_dir: TempDir,
    remote_path: PathBuf,
}

impl Default for PluginFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginFixture {
    /// Generate a fresh plugin repository under a temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let remote_path = generate_plugin("dummy-plugin", temp_dir.path());
        Self {
            temp_dir,
            remote_path,
        }
    }

    /// Path of the generated plugin repository.
    pub fn remote_path(&self) -> &Path {
        &self.remote_path
    }

    /// The fixture's path in URL form, as handed to clone.
    pub fn remote_url(&self) -> String {
        self.remote_path.to_string_lossy().into_owned()
    }

    /// Destination directory for a local clone (not created; clone does
    /// that itself).
    pub fn clone_dir(&self) -> PathBuf {
        self.temp_dir.path().join("clone")
    }

    /// Create an annotated tag on the remote's current tip.
    pub fn add_remote_tag(&self, name: &str) {
        run_git(
            &self.remote_path,
            &["tag", "-a", name, "-m", &format!("Release {name}")],
        );
    }

    /// Commit a new file on the remote's `master`, advancing its tip.
    pub fn add_remote_commit(&self, file_name: &str, content: &str) {
        fs::write(self.remote_path.join(file_name), content).unwrap_or_else(|e| {
            panic!("add_remote_commit: failed to write {file_name}: {e}")
        });
        run_git(&self.remote_path, &["add", file_name]);
        run_git(
            &self.remote_path,
            &["commit", "-m", &format!("Add {file_name}")],
        );
    }
}

fn run_git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("run_git: failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "run_git: `git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
