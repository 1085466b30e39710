//! Plugin repository handle and its synchronization operations.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::commits::{self, CommitInfo};
use crate::error::{Error, Result};
use crate::exec::GitCli;
use crate::types::{Revision, UpdateSummary};

/// Remote a plugin clone tracks unless configured otherwise.
pub const DEFAULT_REMOTE: &str = "origin";

/// Handle to a local plugin clone.
///
/// Construction performs no I/O. Every operation re-opens the on-disk state,
/// so external mutation of the directory between calls is observed rather
/// than masked by a stale in-memory view. A handle assumes single-writer
/// access to its directory; callers running many plugins in parallel must
/// serialize per path.
pub struct PluginRepo {
    directory: PathBuf,
    remote_name: String,
}

impl PluginRepo {
    /// Create a handle for `directory`, tracking [`DEFAULT_REMOTE`].
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_remote(directory, DEFAULT_REMOTE)
    }

    /// Create a handle tracking a custom remote name.
    pub fn with_remote(directory: impl Into<PathBuf>, remote_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            remote_name: remote_name.into(),
        }
    }

    /// Local directory of the clone.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Clone `url` into the handle's directory.
    ///
    /// A non-empty `reference` is checked out instead of the remote's
    /// default branch. On failure the directory is in an unspecified state;
    /// callers should discard it before retrying.
    pub fn clone_repo(&self, url: &str, reference: &str) -> Result<()> {
        tracing::debug!(
            url,
            reference,
            directory = %self.directory.display(),
            "cloning plugin repository"
        );

        let dest = self.directory.to_string_lossy();
        let mut args = vec!["clone", url, dest.as_ref()];
        if !reference.is_empty() {
            args.extend(["--branch", reference]);
        }

        GitCli::new()
            .run(&args)
            .map(|_| ())
            .map_err(|message| Error::Clone { message })
    }

    /// Synchronize the clone with its remote.
    ///
    /// An empty `reference` tracks whatever the remote currently reports as
    /// its default branch; a non-empty one names a branch or tag. Tracked
    /// paths are hard-reset to the target revision. Files that were never
    /// tracked are left on disk untouched: an update must not delete or
    /// alter content the user did not ask git to manage.
    ///
    /// The update is a no-op when the clone is already at the target
    /// revision, in which case `previous == current` in the summary.
    pub fn update(&self, reference: &str) -> Result<UpdateSummary> {
        let git = GitCli::new();

        // Validates the local state before any network access: a missing
        // directory fails at spawn, a non-repository fails in git itself.
        let previous = self
            .rev_parse(&git, "HEAD")
            .map_err(|message| Error::Update { message })?;

        let (ref_label, target) = if reference.is_empty() {
            self.resolve_default_branch(&git)?
        } else {
            self.resolve_explicit_ref(&git, reference)?
        };

        if target == previous {
            tracing::debug!(
                %ref_label,
                revision = %previous,
                "plugin repository already up to date"
            );
            return Ok(UpdateSummary {
                ref_label,
                previous: previous.clone(),
                current: previous,
            });
        }

        git.run_in(&self.directory, &["reset", "--hard", target.as_str()])
            .map_err(|message| Error::Update { message })?;

        // Re-read the tip from disk rather than trusting the computed target.
        let current = self
            .rev_parse(&git, "HEAD")
            .map_err(|message| Error::Update { message })?;

        tracing::debug!(%ref_label, from = %previous, to = %current, "plugin repository updated");

        Ok(UpdateSummary {
            ref_label,
            previous,
            current,
        })
    }

    /// Current tip revision of the local clone.
    pub fn head(&self) -> Result<Revision> {
        let repo = self.open().map_err(|e| Error::Head {
            message: e.message().to_string(),
        })?;

        let head = repo.head().map_err(|e| Error::Head {
            message: e.message().to_string(),
        })?;
        let commit = head.peel_to_commit().map_err(|e| Error::Head {
            message: e.message().to_string(),
        })?;

        Ok(Revision::new(commit.id().to_string()))
    }

    /// URL configured for the tracked remote.
    pub fn remote_url(&self) -> Result<String> {
        let repo = self.open().map_err(|e| Error::Remote {
            message: e.message().to_string(),
        })?;

        let remote = repo.find_remote(&self.remote_name).map_err(|e| Error::Remote {
            message: e.message().to_string(),
        })?;

        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| Error::Remote {
                message: format!("remote '{}' has no configured URL", self.remote_name),
            })
    }

    /// Commits reachable from `to` but not from `from`, newest first.
    ///
    /// Consumed by the plugin manager to show a changelog after an update.
    pub fn changelog(&self, from: &Revision, to: &Revision) -> Result<Vec<CommitInfo>> {
        let repo = self.open().map_err(|e| Error::Head {
            message: e.message().to_string(),
        })?;

        commits::commits_between(&repo, from, to).map_err(|e| Error::Head {
            message: e.message().to_string(),
        })
    }

    fn open(&self) -> std::result::Result<Repository, git2::Error> {
        Repository::open(&self.directory)
    }

    /// Fetch the remote and resolve its default branch.
    ///
    /// Returns the fully-qualified local tracking label
    /// (`refs/heads/<branch>`) and the revision of the remote-tracking tip.
    fn resolve_default_branch(&self, git: &GitCli) -> Result<(String, Revision)> {
        git.run_in(&self.directory, &["fetch", &self.remote_name])
            .map_err(|message| Error::Update { message })?;

        // Refresh the recorded remote HEAD so a default-branch change on the
        // remote is picked up by this resolution, not just the next clone.
        if let Err(message) = git.run_in(
            &self.directory,
            &["remote", "set-head", &self.remote_name, "--auto"],
        ) {
            tracing::warn!(
                remote = %self.remote_name,
                %message,
                "could not refresh remote HEAD; using the recorded value"
            );
        }

        let head_ref = format!("refs/remotes/{}/HEAD", self.remote_name);
        let symref = git
            .run_in(&self.directory, &["symbolic-ref", &head_ref])
            .map_err(|message| Error::Update { message })?;

        let tracking_prefix = format!("refs/remotes/{}/", self.remote_name);
        let branch = symref.strip_prefix(&tracking_prefix).unwrap_or(&symref);

        let tracking_ref = format!("{tracking_prefix}{branch}");
        let target = self
            .rev_parse(git, &tracking_ref)
            .map_err(|message| Error::Update { message })?;

        Ok((format!("refs/heads/{branch}"), target))
    }

    /// Fetch a single explicit branch or tag and resolve its tip.
    ///
    /// A ref the remote does not know surfaces git's own
    /// `fatal: couldn't find remote ref <ref>` message. FETCH_HEAD is peeled
    /// to the commit so an annotated tag resolves to the same id the local
    /// tip reports, not to the tag object.
    fn resolve_explicit_ref(&self, git: &GitCli, reference: &str) -> Result<(String, Revision)> {
        git.run_in(&self.directory, &["fetch", &self.remote_name, reference])
            .map_err(|message| Error::Update { message })?;

        let target = self
            .rev_parse(git, "FETCH_HEAD^{commit}")
            .map_err(|message| Error::Update { message })?;

        Ok((reference.to_string(), target))
    }

    fn rev_parse(&self, git: &GitCli, spec: &str) -> std::result::Result<Revision, String> {
        git.run_in(&self.directory, &["rev-parse", "--verify", spec])
            .map(Revision::new)
    }
}
