//! Link management and analytics flow
//!
//! Lists the caller's links with click counts, deletes by short code and
//! copies short URLs. The backend stays the only source of truth: every
//! change is followed by a full re-fetch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use super::clipboard::Clipboard;
use super::scope::ScreenScope;
use crate::api::ShortLink;
use crate::api::constants::REDIRECT_PREFIX;
use crate::errors::{Result, ShortyError};
use crate::session::SessionGuard;

pub const MSG_LOGIN_FIRST: &str = "Please log in first.";
pub const MSG_LOAD_FAILED: &str = "Failed to load analytics.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete URL.";
pub const MSG_COPIED: &str = "Short URL copied to clipboard!";

/// What the analytics screen shows; exactly one state at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsView {
    Loading,
    Error(String),
    Empty,
    Populated(Vec<ShortLink>),
}

impl AnalyticsView {
    pub fn from_links(links: Vec<ShortLink>) -> Self {
        if links.is_empty() {
            AnalyticsView::Empty
        } else {
            AnalyticsView::Populated(links)
        }
    }

    pub fn links(&self) -> &[ShortLink] {
        match self {
            AnalyticsView::Populated(links) => links,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AnalyticsView::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalyticsView::Loading => "loading",
            AnalyticsView::Error(_) => "error",
            AnalyticsView::Empty => "empty",
            AnalyticsView::Populated(_) => "populated",
        }
    }
}

/// Confirmation shown after a copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyNotice {
    pub short_code: String,
    pub short_url: String,
    pub message: String,
    pub shown_at: Instant,
}

impl CopyNotice {
    pub fn is_expired(&self, now: Instant, delay: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= delay
    }
}

/// Result of a delete: the re-fetched view plus the action message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub view: AnalyticsView,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct AnalyticsFlow {
    guard: SessionGuard,
    clipboard: Arc<dyn Clipboard>,
    redirect_base: String,
    copy_delay: Duration,
}

impl AnalyticsFlow {
    pub fn new(
        guard: SessionGuard,
        clipboard: Arc<dyn Clipboard>,
        redirect_base: impl Into<String>,
        copy_delay: Duration,
    ) -> Self {
        Self {
            guard,
            clipboard,
            redirect_base: redirect_base.into().trim_end_matches('/').to_string(),
            copy_delay,
        }
    }

    pub fn copy_delay(&self) -> Duration {
        self.copy_delay
    }

    /// Resolve the identity, then fetch its links
    ///
    /// Never fails: problems become [`AnalyticsView::Error`].
    pub async fn load(&self) -> AnalyticsView {
        let Some(session) = self.guard.check().await else {
            return AnalyticsView::Error(MSG_LOGIN_FIRST.to_string());
        };
        match self.guard.client().list_links(session.identifier()).await {
            Ok(links) => {
                debug!("Fetched {} links for {}", links.len(), session.identifier());
                AnalyticsView::from_links(links)
            }
            Err(e) => {
                error!("Failed to fetch analytics: {}", e);
                AnalyticsView::Error(MSG_LOAD_FAILED.to_string())
            }
        }
    }

    /// [`AnalyticsFlow::load`] bound to a screen activation
    pub async fn activate(&self, scope: &ScreenScope) -> Result<AnalyticsView> {
        scope.guard(self.load()).await
    }

    /// Delete `short_code`, then re-fetch regardless of the outcome
    pub async fn delete(&self, short_code: &str) -> DeleteOutcome {
        let deleted = match self.guard.client().delete_link(short_code).await {
            Ok(()) => {
                info!("Deleted short link {}", short_code);
                true
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", short_code, e);
                false
            }
        };
        let view = self.load().await;
        DeleteOutcome {
            deleted,
            view,
            message: (!deleted).then(|| MSG_DELETE_FAILED.to_string()),
        }
    }

    /// `<redirect base>/s/<short_code>`
    pub fn short_url(&self, short_code: &str) -> String {
        format!(
            "{}{}{}",
            self.redirect_base,
            REDIRECT_PREFIX,
            urlencoding::encode(short_code)
        )
    }

    /// Put the short URL of `short_code` on the clipboard
    pub fn copy(&self, short_code: &str) -> Result<CopyNotice> {
        if short_code.is_empty() {
            return Err(ShortyError::validation("No short code selected"));
        }
        let short_url = self.short_url(short_code);
        self.clipboard.set_text(&short_url)?;
        debug!("Copied {} to clipboard", short_url);
        Ok(CopyNotice {
            short_code: short_code.to_string(),
            short_url,
            message: MSG_COPIED.to_string(),
            shown_at: Instant::now(),
        })
    }
}

/// Analytics screen state
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub view: AnalyticsView,
    pub action_message: Option<String>,
    pub notice: Option<CopyNotice>,
    copy_delay: Duration,
}

impl AnalyticsState {
    pub fn new(copy_delay: Duration) -> Self {
        Self {
            view: AnalyticsView::Loading,
            action_message: None,
            notice: None,
            copy_delay,
        }
    }

    /// Back to loading for a new fetch
    pub fn begin_loading(&mut self) {
        self.view = AnalyticsView::Loading;
    }

    pub fn apply_view(&mut self, view: AnalyticsView) {
        self.view = view;
    }

    pub fn apply_delete(&mut self, outcome: DeleteOutcome) {
        self.view = outcome.view;
        self.action_message = outcome.message;
    }

    pub fn show_notice(&mut self, notice: CopyNotice) {
        self.notice = Some(notice);
    }

    /// Drop an expired copy notice; returns whether anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.notice {
            Some(notice) if notice.is_expired(now, self.copy_delay) => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Notice text for `short_code`, if it is the one just copied
    pub fn notice_for(&self, short_code: &str) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| n.short_code == short_code)
            .map(|n| n.message.as_str())
    }
}
