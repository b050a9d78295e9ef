//! Git integration for store history.
//!
//! The work tree and git directory are applied to each spawned command
//! individually instead of being exported process-wide.

use crate::error::{Result, StoreError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

/// Binding of a store to its git repository.
pub struct GitContext<'a> {
    work_tree: &'a Path,
    git_dir: &'a Path,
}

impl<'a> GitContext<'a> {
    pub fn new(work_tree: &'a Path, git_dir: &'a Path) -> Self {
        Self { work_tree, git_dir }
    }

    /// Base git command with the repository binding applied.
    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.env("GIT_WORK_TREE", self.work_tree)
            .env("GIT_DIR", self.git_dir);
        cmd
    }

    /// Run git with `args` and fail on a nonzero exit.
    fn run_checked<I, S>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = self.command().args(args).status()?;
        if !status.success() {
            return Err(StoreError::ToolFailed {
                tool: "git",
                status,
            });
        }
        Ok(())
    }

    /// Forward `args` verbatim with inherited stdio.
    ///
    /// A nonzero child exit is reported as `GitExit` so the process can
    /// relay the exact code.
    pub fn passthrough(&self, args: &[String]) -> Result<()> {
        let status = self.command().args(args).status()?;
        if !status.success() {
            return Err(StoreError::GitExit(status.code().unwrap_or(1)));
        }
        Ok(())
    }

    /// Stage `path`, then commit: two sequential blocking calls.
    ///
    /// Staging must succeed. The commit's exit status is tolerated since
    /// an empty store legitimately has nothing to commit. Without a
    /// message the commit runs interactively; internal callers always
    /// supply one.
    pub fn add_and_commit(&self, path: &str, message: Option<&str>) -> Result<()> {
        self.run_checked(["add", path])?;

        let _ = match message {
            Some(m) => self.command().args(["commit", "-m", m]).status()?,
            None => self.command().arg("commit").status()?,
        };
        Ok(())
    }

    /// Set a local repository configuration value.
    pub fn config_local(&self, key: &str, value: &str) -> Result<()> {
        self.run_checked(["config", "--local", key, value])
    }

    /// Initialize a repository at `path` and pull `url`'s master branch.
    ///
    /// Each step's exit status is checked; the sequence aborts on the
    /// first failure.
    pub fn clone_into(&self, path: &Path, url: &str) -> Result<()> {
        self.run_checked([OsStr::new("init"), path.as_os_str()])?;
        self.run_checked(["remote", "add", "origin", url])?;
        self.run_checked(["pull", "origin", "master"])
    }
}
