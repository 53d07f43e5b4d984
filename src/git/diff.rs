//! Unstaged diff collection via `git diff`.

use std::env;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::coordinator::DiffSource;
use crate::error::DiffError;

/// Default timeout for the git diff subprocess (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "COMMITGEN_GIT_TIMEOUT";

/// Get the configured subprocess timeout.
///
/// Reads from COMMITGEN_GIT_TIMEOUT if set, otherwise uses the default of
/// 30 seconds. Logs a warning if the variable holds an invalid value.
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

/// Run `git diff` scoped to the given repository root and return its
/// stdout as text.
///
/// Read-only with respect to repository state. An empty or
/// whitespace-only result is not an error here; the coordinator decides
/// how to report it.
pub async fn collect_diff(root: &Path) -> Result<String, DiffError> {
    let timeout_duration = get_timeout();
    let timeout_secs = timeout_duration.as_secs();

    debug!(root = %root.display(), "collecting unstaged diff");

    let output = timeout(
        timeout_duration,
        Command::new("git")
            .arg("diff")
            .current_dir(root)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .map_err(|_| DiffError::Timeout(timeout_secs))?
    .map_err(DiffError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(DiffError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// [`DiffSource`] backed by the real git binary.
pub struct GitDiff;

#[async_trait]
impl DiffSource for GitDiff {
    async fn collect(&self, root: &Path) -> Result<String, DiffError> {
        collect_diff(root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_timeout_default() {
        temp_env::with_var_unset(TIMEOUT_ENV_VAR, || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_get_timeout_from_env() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("5"), || {
            assert_eq!(get_timeout(), Duration::from_secs(5));
        });
    }

    #[test]
    fn test_get_timeout_invalid_env_uses_default() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some("soon"), || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_get_timeout_empty_env_uses_default() {
        temp_env::with_var(TIMEOUT_ENV_VAR, Some(""), || {
            assert_eq!(get_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        });
    }
}
