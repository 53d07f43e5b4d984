//! commitgen - Generates a commit message from unstaged changes using a
//! remote AI backend.
//!
//! # Overview
//!
//! commitgen collects the current `git diff` of a working copy, submits
//! it to a remote generation endpoint, and surfaces the result as one of
//! four signals (show, info, error, loading). The generated text can be
//! copied to the clipboard or used directly to stage and commit.

pub mod backend;
pub mod clipboard;
pub mod coordinator;
pub mod error;
pub mod git;

// Re-export commonly used types
pub use backend::GenerationClient;
pub use coordinator::{RequestCoordinator, Session, Signal, SurfaceCommand};
pub use error::{CommitError, DiffError, GenerationError};
