//! Surface protocol: the closed tagged-union message types crossing the
//! presentation boundary.
//!
//! Payloads arriving from a presentation surface are validated into
//! [`SurfaceCommand`] at the boundary rather than trusted as already
//! typed; outgoing [`Signal`]s serialize to the matching wire shape
//! (`{"command": "...", "text": "..."}`).

use serde::{Deserialize, Serialize};

/// Inbound command from the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum SurfaceCommand {
    /// Collect the current diff and generate a commit message.
    Generate,
    /// Copy previously generated text to the system clipboard.
    Copy { text: String },
    /// Stage everything and commit with the given message.
    Commit { text: String },
}

/// Outcome signal sent up to the presentation surface. The entire
/// vocabulary the core exposes; surfaces are polymorphic over these four
/// variants and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Signal {
    /// A generated commit message to display.
    Show { text: String },
    /// A non-error notice (empty diff, copy/commit confirmations).
    Info { text: String },
    /// A terminal failure, surfaced verbatim for display.
    Error { text: String },
    /// Advisory: a generate request is in flight.
    Loading,
}

impl Signal {
    pub fn show(text: impl Into<String>) -> Self {
        Signal::Show { text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Signal::Info { text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Signal::Error { text: text.into() }
    }
}
