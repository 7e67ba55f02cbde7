//! # Sync
//!
//! One-shot "save everything and share it" for a git working tree:
//! `git add .`, a timestamped `git commit`, `git pull`, `git push`.
//!
//! A failed commit is tolerated so that pulling and pushing still happen; its
//! exit status is kept in the [`SyncReport`]. Any other failing step ends the
//! cycle.

mod error;

pub use crate::error::{SyncError, SyncErrorExt};

use chrono::NaiveDateTime;
use fh_kernel::process::{CommandRunner, CommandSpec, CommandStatus};
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

const COMMIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One git invocation of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Add,
    Commit,
    Pull,
    Push,
}

impl SyncStep {
    /// The git subcommand name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Commit => "commit",
            Self::Pull => "pull",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completed cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// The commit message that was attempted.
    pub message: String,
    /// How `git commit` exited. Non-zero means the commit was skipped: nothing
    /// to commit, a rejecting hook, a missing identity, ...
    pub commit_status: CommandStatus,
}

impl SyncReport {
    #[must_use]
    pub const fn committed(&self) -> bool {
        self.commit_status.success()
    }
}

/// `Update 2026-10-16 09:22:05.`
#[must_use]
pub fn commit_message(at: NaiveDateTime) -> String {
    format!("Update {}.", at.format(COMMIT_TIMESTAMP_FORMAT))
}

/// Runs the add/commit/pull/push cycle in a repository.
#[derive(Debug)]
pub struct GitSync<'a, R> {
    repo: &'a Path,
    runner: R,
}

impl<'a, R: CommandRunner> GitSync<'a, R> {
    pub const fn new(repo: &'a Path, runner: R) -> Self {
        Self { repo, runner }
    }

    /// Runs the cycle, stamping the commit with `at`.
    ///
    /// # Errors
    /// * [`SyncError::StepFailed`] when add, pull or push exits non-zero; later steps are skipped.
    /// * [`SyncError::Process`] when git cannot be started.
    pub fn sync(&self, at: NaiveDateTime) -> Result<SyncReport, SyncError> {
        let message = commit_message(at);

        self.step(SyncStep::Add, &["."])?;

        let commit_status = self.run_step(SyncStep::Commit, &["-m", message.as_str()])?;
        if !commit_status.success() {
            warn!(status = %commit_status, "Commit skipped, continuing with pull and push");
        }

        self.step(SyncStep::Pull, &[])?;
        self.step(SyncStep::Push, &[])?;

        info!(repo = %self.repo.display(), %commit_status, "Sync complete");
        Ok(SyncReport { message, commit_status })
    }

    fn step(&self, step: SyncStep, extra: &[&str]) -> Result<(), SyncError> {
        let status = self.run_step(step, extra)?;
        if status.success() {
            Ok(())
        } else {
            Err(SyncError::StepFailed { step, status, context: None })
        }
    }

    fn run_step(&self, step: SyncStep, extra: &[&str]) -> Result<CommandStatus, SyncError> {
        let spec = CommandSpec::new("git")
            .arg(step.as_str())
            .args(extra.iter().copied())
            .current_dir(self.repo);

        self.runner.run(&spec).context(format!("git {step}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn commit_message_is_zero_padded() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        assert_eq!(commit_message(at), "Update 2026-01-02 03:04:05.");
    }

    #[test]
    fn step_names_match_git_subcommands() {
        let names: Vec<_> =
            [SyncStep::Add, SyncStep::Commit, SyncStep::Pull, SyncStep::Push].map(SyncStep::as_str).into();
        assert_eq!(names, ["add", "commit", "pull", "push"]);
    }
}
