//! Request coordination: the generate/copy/commit lifecycle.
//!
//! [`RequestCoordinator`] sequences diff collection and backend
//! submission, maps every outcome onto the four-variant [`Signal`]
//! vocabulary, and optionally drives the commit path. Collaborators sit
//! behind traits so tests can stub them out.

pub mod protocol;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{CommitError, DiffError, GenerationError};

pub use protocol::{Signal, SurfaceCommand};

/// Source of the working-tree diff.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiffSource: Send + Sync {
    async fn collect(&self, root: &Path) -> Result<String, DiffError>;
}

/// Remote commit-message generator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, diff: &str) -> Result<String, GenerationError>;
}

/// Stages and commits with a given message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Committer: Send + Sync {
    async fn commit(&self, root: &Path, message: &str) -> Result<(), CommitError>;
}

/// System clipboard writer. Failures are not modeled at this boundary.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str);
}

/// Receiver for outbound signals; the presentation surface's side of the
/// protocol.
pub trait SignalSink: Send + Sync {
    fn post(&self, signal: Signal);
}

/// Per-call surface state: the workspace the request targets.
///
/// Owned by the presentation-surface adapter and injected into every
/// `handle` call rather than captured as ambient state. The root is read
/// at the start of each request and never cached by the coordinator.
#[derive(Debug, Clone, Default)]
pub struct Session {
    workspace: Option<PathBuf>,
}

impl Session {
    pub fn new(workspace: Option<PathBuf>) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }
}

/// The request state machine.
///
/// Each `generate` runs Idle -> Collecting -> (EmptyDiff | Submitting) ->
/// (Succeeded | Failed) as straight-line awaited steps; diff collection
/// strictly precedes submission, and exactly one outcome signal reaches
/// the sink per invocation.
///
/// Overlapping `generate` calls are not serialized. Instead each call
/// takes a fresh sequence number and only the newest call's terminal
/// signal is posted; stale responses are dropped with a warning.
pub struct RequestCoordinator<D, G, C, P> {
    diff_source: D,
    generator: G,
    committer: C,
    clipboard: P,
    generate_seq: AtomicU64,
}

impl<D, G, C, P> RequestCoordinator<D, G, C, P>
where
    D: DiffSource,
    G: MessageGenerator,
    C: Committer,
    P: Clipboard,
{
    pub fn new(diff_source: D, generator: G, committer: C, clipboard: P) -> Self {
        Self {
            diff_source,
            generator,
            committer,
            clipboard,
            generate_seq: AtomicU64::new(0),
        }
    }

    /// Dispatch one surface command, posting signals to `sink`.
    pub async fn handle<S: SignalSink>(
        &self,
        session: &Session,
        command: SurfaceCommand,
        sink: &S,
    ) {
        match command {
            SurfaceCommand::Generate => self.generate(session, sink).await,
            SurfaceCommand::Copy { text } => self.copy(&text, sink),
            SurfaceCommand::Commit { text } => self.commit(session, &text, sink).await,
        }
    }

    async fn generate<S: SignalSink>(&self, session: &Session, sink: &S) {
        let seq = self.generate_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(root) = session.workspace() else {
            self.post_if_current(seq, Signal::error("Open a workspace first."), sink);
            return;
        };

        sink.post(Signal::Loading);

        debug!(seq, root = %root.display(), "collecting diff");
        let diff = match self.diff_source.collect(root).await {
            Ok(diff) => diff,
            Err(e) => {
                self.post_if_current(seq, Signal::error(format!("Git diff failed: {e}")), sink);
                return;
            }
        };

        if diff.trim().is_empty() {
            self.post_if_current(seq, Signal::info("No changes to diff."), sink);
            return;
        }

        debug!(seq, "submitting diff to generator");
        let signal = match self.generator.generate(&diff).await {
            Ok(message) => Signal::show(message),
            Err(e) => Signal::error(e.to_string()),
        };
        self.post_if_current(seq, signal, sink);
    }

    fn copy<S: SignalSink>(&self, text: &str, sink: &S) {
        self.clipboard.write_text(text);
        sink.post(Signal::info("Copied commit message!"));
    }

    async fn commit<S: SignalSink>(&self, session: &Session, message: &str, sink: &S) {
        let Some(root) = session.workspace() else {
            sink.post(Signal::error("No workspace folder open."));
            return;
        };

        debug!(root = %root.display(), "staging and committing");
        match self.committer.commit(root, message).await {
            Ok(()) => sink.post(Signal::info("Commit created successfully!")),
            Err(e) => sink.post(Signal::error(format!("Commit failed: {e}"))),
        }
    }

    /// Post a terminal generate signal only if `seq` is still the newest
    /// generate request.
    fn post_if_current<S: SignalSink>(&self, seq: u64, signal: Signal, sink: &S) {
        if self.generate_seq.load(Ordering::SeqCst) == seq {
            sink.post(signal);
        } else {
            warn!(seq, ?signal, "dropping stale generate response");
        }
    }
}
