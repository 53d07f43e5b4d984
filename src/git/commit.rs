//! Stage-and-commit via `git add -A` and `git commit -F -`.

use std::env;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::coordinator::Committer;
use crate::error::CommitError;

/// Default timeout for each git subprocess in the commit path (60 seconds,
/// hooks can be slow).
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "COMMITGEN_GIT_TIMEOUT";

fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Stage every change in the working copy and create a commit with the
/// given message.
///
/// The message is written to `git commit -F -` over stdin rather than
/// passed as a shell argument, so multi-line and quote-containing
/// generated text survives intact. The only state-mutating operation in
/// the crate.
pub async fn stage_and_commit(root: &Path, message: &str) -> Result<(), CommitError> {
    debug!(root = %root.display(), "staging all changes");
    run_git_checked(root, &["add", "-A"], "add", None).await?;

    debug!("creating commit");
    run_git_checked(root, &["commit", "-F", "-"], "commit", Some(message)).await
}

/// Run a git subcommand, optionally piping `stdin_data` to it, and map a
/// non-zero exit to [`CommitError::Failed`] carrying the tool's stderr.
async fn run_git_checked(
    root: &Path,
    args: &[&str],
    operation: &str,
    stdin_data: Option<&str>,
) -> Result<(), CommitError> {
    let timeout_duration = get_timeout();
    let timeout_secs = timeout_duration.as_secs();

    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(root)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if stdin_data.is_some() {
        command.stdin(Stdio::piped());
    }

    let run = async {
        let mut child = command.spawn().map_err(CommitError::SpawnFailed)?;

        if let Some(data) = stdin_data {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(data.as_bytes())
                    .await
                    .map_err(CommitError::SpawnFailed)?;
                // Drop closes the pipe so git sees EOF on the message.
            }
        }

        child
            .wait_with_output()
            .await
            .map_err(CommitError::SpawnFailed)
    };

    let output = timeout(timeout_duration, run)
        .await
        .map_err(|_| CommitError::Timeout {
            operation: operation.to_string(),
            seconds: timeout_secs,
        })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let diagnostic = if stderr.is_empty() {
            format!(
                "git {} exited with code {}",
                operation,
                output.status.code().unwrap_or(-1)
            )
        } else {
            stderr
        };
        return Err(CommitError::Failed(diagnostic));
    }

    Ok(())
}

/// [`Committer`] backed by the real git binary.
pub struct GitCommitter;

#[async_trait]
impl Committer for GitCommitter {
    async fn commit(&self, root: &Path, message: &str) -> Result<(), CommitError> {
        stage_and_commit(root, message).await
    }
}
