//! User-facing flows shared by the CLI and the TUI

pub mod analytics;
pub mod clipboard;
pub mod create;
pub mod profile;
mod scope;

pub use analytics::{AnalyticsFlow, AnalyticsState, AnalyticsView, CopyNotice, DeleteOutcome};
pub use clipboard::{Clipboard, MemoryClipboard, default_clipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use create::{AliasMode, CreateForm, CreatedLink, Feedback, FeedbackStatus, LinkCreationFlow};
pub use profile::{ProfileFlow, ProfileOutcome};
pub use scope::ScreenScope;
