//! Commit history extraction for update changelogs.

use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository};

use crate::types::Revision;

/// Information about a single commit.
pub struct CommitInfo {
    /// Short commit hash (7 characters)
    pub hash: String,

    /// First line of the commit message
    pub message: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

/// Commits reachable from `to` but not from `from`.
///
/// Performs a time-sorted revwalk hiding everything behind `from`.
/// Returns commits in reverse-chronological order (most recent first).
pub fn commits_between(
    repo: &Repository,
    from: &Revision,
    to: &Revision,
) -> Result<Vec<CommitInfo>, git2::Error> {
    let from_oid = Oid::from_str(from.as_str())?;
    let to_oid = Oid::from_str(to.as_str())?;

    let mut revwalk = repo.revwalk()?;
    revwalk.push(to_oid)?;
    revwalk.hide(from_oid)?;
    revwalk.set_sorting(git2::Sort::TIME)?;

    let mut commits = Vec::new();

    for oid_result in revwalk {
        let oid = oid_result?;
        let commit = repo.find_commit(oid)?;

        let timestamp = commit.time();
        let dt: DateTime<Utc> = Utc
            .timestamp_opt(timestamp.seconds(), 0)
            .single()
            .unwrap_or_default();

        let message = commit
            .message()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        let author = commit.author();
        let author_name = author.name().unwrap_or("Unknown").to_string();

        let short_hash = format!("{:.7}", oid);

        commits.push(CommitInfo {
            hash: short_hash,
            message,
            author: author_name,
            timestamp: dt,
        });
    }

    Ok(commits)
}
