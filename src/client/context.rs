//! Service context shared by the CLI and TUI front ends

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::{ApiClient, HttpTransport, UreqTransport};
use crate::config::StaticConfig;
use crate::errors::Result;
use crate::flows::{
    AnalyticsFlow, Clipboard, LinkCreationFlow, ProfileFlow, default_clipboard,
};
use crate::session::{Session, SessionContext, SessionGuard, SessionStore};

/// Everything a front end needs, wired from one configuration
///
/// Created once per CLI invocation or TUI session. All flows share the
/// same [`ApiClient`] (and therefore cookie jar) and [`SessionContext`].
#[derive(Clone)]
pub struct ServiceContext {
    config: Arc<StaticConfig>,
    guard: SessionGuard,
    creation: LinkCreationFlow,
    analytics: AnalyticsFlow,
    profile: ProfileFlow,
}

impl ServiceContext {
    /// Real HTTP transport, on-disk session store and system clipboard
    ///
    /// `clipboard_hold` keeps copies alive after a one-shot command exits.
    pub fn from_config(config: Arc<StaticConfig>, clipboard_hold: Option<Duration>) -> Result<Self> {
        let transport = UreqTransport::new(Duration::from_secs(config.api.timeout_secs));
        let store = SessionStore::new(&config.session.store_path);
        Self::with_parts(
            config,
            Arc::new(transport),
            Some(store),
            default_clipboard(clipboard_hold),
        )
    }

    pub fn with_parts(
        config: Arc<StaticConfig>,
        transport: Arc<dyn HttpTransport>,
        store: Option<SessionStore>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Result<Self> {
        let client = ApiClient::new(&config.api, transport)?;
        let mut guard = SessionGuard::new(client.clone(), SessionContext::new());
        if let Some(store) = store {
            debug!("Session store at {}", store.path().display());
            guard = guard.with_store(store);
        }

        let creation = LinkCreationFlow::new(client.clone(), config.api.response_contract);
        let analytics = AnalyticsFlow::new(
            guard.clone(),
            clipboard,
            config.redirect_base(),
            Duration::from_secs(config.analytics.copy_notice_secs),
        );
        let profile = ProfileFlow::new(client);

        Ok(Self {
            config,
            guard,
            creation,
            analytics,
            profile,
        })
    }

    pub fn config(&self) -> &StaticConfig {
        &self.config
    }

    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    pub fn session(&self) -> &SessionContext {
        self.guard.context()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.guard.context().current()
    }

    pub fn creation(&self) -> &LinkCreationFlow {
        &self.creation
    }

    pub fn analytics(&self) -> &AnalyticsFlow {
        &self.analytics
    }

    pub fn profile(&self) -> &ProfileFlow {
        &self.profile
    }
}
