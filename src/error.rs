//! Error types for commitgen modules using thiserror.

use thiserror::Error;

/// Errors from collecting the working-tree diff.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git executable not found. Install git and ensure it is on PATH")]
    GitNotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git diff exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("git diff timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors from the remote generation backend.
///
/// Display strings double as the user-facing text the coordinator surfaces,
/// so `Backend` and `Network` carry their presentation prefixes here.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The backend answered with a non-success status. The body is the raw
    /// response text, kept opaque for diagnostic display.
    #[error("Backend {status}: {status_text}\n{body}")]
    Backend {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Transport-level failure: DNS, connection refused, timeout, TLS.
    #[error("Network error: {0}")]
    Network(String),

    /// A success status whose body did not contain the expected
    /// `aiResponse` field.
    #[error("Backend returned an unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// Errors from staging and committing.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The diagnostic is the tool's stderr when non-empty, otherwise a
    /// generic exit description.
    #[error("{0}")]
    Failed(String),

    #[error("git {operation} timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },
}
