//! Clipboard functionality for copying calculator results.
//!
//! On Linux the copied text is served by the process that set it, so it
//! disappears once the owning [`Clipboard`] is gone. A [`ResultClipboard`]
//! therefore lives as long as the shell, and a process that exits right
//! after copying uses [`ResultClipboard::copy_and_wait`].

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::{debug, info};

use super::operation::Value;

/// Text placed on the clipboard for a value: exactly what is displayed.
pub fn clipboard_text(value: &Value) -> String {
    value.to_string()
}

pub struct ResultClipboard {
    clipboard: Clipboard,
}

impl ResultClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to access clipboard")?;
        Ok(Self { clipboard })
    }

    /// Copy `value`. The text stays available while `self` is alive.
    pub fn copy(&mut self, value: &Value) -> Result<()> {
        let text = clipboard_text(value);
        self.clipboard
            .set_text(text.clone())
            .context("Failed to copy to clipboard")?;
        debug!(%text, "copied result to clipboard");
        Ok(())
    }

    /// Copy `value` and block until another program takes over the
    /// clipboard, so the text outlives this process.
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    pub fn copy_and_wait(&mut self, value: &Value) -> Result<()> {
        use arboard::SetExtLinux;

        let text = clipboard_text(value);
        info!(%text, "serving clipboard until it is taken over");
        self.clipboard
            .set()
            .wait()
            .text(text)
            .context("Failed to copy to clipboard")
    }

    /// Copy `value`; the platform clipboard keeps it after exit.
    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    pub fn copy_and_wait(&mut self, value: &Value) -> Result<()> {
        self.copy(value)
    }
}
