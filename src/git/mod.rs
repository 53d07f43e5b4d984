//! Git subprocess operations: diff collection and stage-and-commit.
//!
//! All operations shell out to the system `git` binary, inheriting the
//! user's existing git config and credential store.

pub mod commit;
pub mod diff;

use tokio::process::Command;

use crate::error::DiffError;

/// Check that the git executable is installed and runnable.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// verifies the binary actually runs by probing `git --version`.
pub async fn check_git_installed() -> Result<(), DiffError> {
    if which::which("git").is_err() {
        return Err(DiffError::GitNotInstalled);
    }

    let version_check = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(DiffError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(DiffError::GitNotInstalled);
    }

    Ok(())
}
