//! Core types shared across plugin-git operations.

use std::fmt;

/// A resolved commit identifier (full hex object id).
///
/// Opaque to this component: revisions are only compared for equality,
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub(crate) fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// The hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful [`update`](crate::PluginRepo::update).
///
/// When the clone was already at the remote tip, `previous == current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Ref the repository was synchronized to: the fully-qualified tracking
    /// path for default-branch updates (e.g. `refs/heads/master`), the bare
    /// name as supplied for explicit refs.
    pub ref_label: String,

    /// Tip revision before the update.
    pub previous: Revision,

    /// Tip revision after the update, re-read from disk.
    pub current: Revision,
}
