//! Hardened git CLI invocation.
//!
//! Clone, fetch, reset, and ref resolution go through the system git binary:
//! its stderr text (`fatal: couldn't find remote ref ...`,
//! `not a git repository`, ...) is part of the diagnostic contract with
//! callers, and only the real CLI produces it verbatim. Local read-only
//! queries use git2 instead (see [`crate::repo`] and [`crate::commits`]).

use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Thin wrapper around the system `git` binary.
pub(crate) struct GitCli {
    git_path: String,
}

impl GitCli {
    pub(crate) fn new() -> Self {
        Self {
            git_path: "git".into(),
        }
    }

    /// Hardened command: no interactive credential prompts, no stdin.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git_path);
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Run git with `args` and no working directory (used by clone, which
    /// receives the destination as an argument).
    pub(crate) fn run(&self, args: &[&str]) -> std::result::Result<String, String> {
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|e| e.to_string())?;
        collect(output)
    }

    /// Run git with `args` inside `workdir`.
    ///
    /// A missing `workdir` fails at spawn time and surfaces the OS error
    /// text ("No such file or directory") instead of git output.
    pub(crate) fn run_in(
        &self,
        workdir: &Path,
        args: &[&str],
    ) -> std::result::Result<String, String> {
        let output = self
            .command()
            .current_dir(workdir)
            .args(args)
            .output()
            .map_err(|e| e.to_string())?;
        collect(output)
    }
}

/// Trimmed stdout on success, trimmed stderr on failure.
fn collect(output: Output) -> std::result::Result<String, String> {
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}
