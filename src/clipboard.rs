//! System clipboard access.

use tracing::warn;

use crate::coordinator::Clipboard;

/// [`Clipboard`] backed by the OS clipboard via arboard.
///
/// Clipboard failures are not part of the surfaced error model; a failed
/// write is logged and otherwise ignored.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(text) {
                    warn!("Failed to write clipboard: {e}");
                }
            }
            Err(e) => warn!("Clipboard unavailable: {e}"),
        }
    }
}
