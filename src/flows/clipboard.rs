//! Clipboard access

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::errors::{Result, ShortyError};

pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard via `arboard`
///
/// A fresh handle is opened per copy. On X11/Wayland the clipboard content
/// is served by the owning process, so a process that exits right after
/// copying loses it. With `hold` set, the write blocks until another
/// client takes the selection or the hold runs out.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard {
    hold: Option<Duration>,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new(hold: Option<Duration>) -> Self {
        Self { hold }
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ShortyError::clipboard(format!("Clipboard unavailable: {}", e)))?;

        #[cfg(target_os = "linux")]
        if let Some(hold) = self.hold {
            use arboard::SetExtLinux;

            tracing::debug!("Holding clipboard for up to {:?}", hold);
            return clipboard
                .set()
                .wait_until(std::time::Instant::now() + hold)
                .text(text)
                .map_err(|e| ShortyError::clipboard(format!("Failed to write clipboard: {}", e)));
        }
        #[cfg(not(target_os = "linux"))]
        let _ = self.hold;

        clipboard
            .set_text(text)
            .map_err(|e| ShortyError::clipboard(format!("Failed to write clipboard: {}", e)))
    }
}

/// In-process clipboard, used when no desktop clipboard is compiled in
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
    fail: Mutex<bool>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().clone()
    }

    /// Make subsequent writes fail
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        if *self.fail.lock() {
            return Err(ShortyError::clipboard("Clipboard unavailable"));
        }
        *self.content.lock() = Some(text.to_string());
        Ok(())
    }
}

/// Default clipboard for this build
///
/// `hold` only matters for the system clipboard on Linux.
pub fn default_clipboard(hold: Option<Duration>) -> Arc<dyn Clipboard> {
    #[cfg(feature = "clipboard")]
    {
        Arc::new(SystemClipboard::new(hold))
    }
    #[cfg(not(feature = "clipboard"))]
    {
        let _ = hold;
        Arc::new(MemoryClipboard::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.content(), None);
        clipboard.set_text("http://x/s/abc").unwrap();
        assert_eq!(clipboard.content().as_deref(), Some("http://x/s/abc"));

        clipboard.set_failing(true);
        assert!(matches!(
            clipboard.set_text("other"),
            Err(ShortyError::Clipboard(_))
        ));
        assert_eq!(clipboard.content().as_deref(), Some("http://x/s/abc"));
    }
}
