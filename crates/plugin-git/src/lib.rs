//! Git synchronization for plugin repositories
//!
//! Clones a plugin's git repository to a local directory, resolves refs
//! (branch, tag, or the remote's default branch) to concrete revisions, and
//! updates an existing clone in place without touching untracked files.

pub mod commits;
pub mod error;
pub mod repo;
pub mod types;

mod exec;

pub use commits::CommitInfo;
pub use error::{Error, Result};
pub use repo::{DEFAULT_REMOTE, PluginRepo};
pub use types::{Revision, UpdateSummary};
