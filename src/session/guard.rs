//! Session guard
//!
//! Decides, per route activation, whether a protected screen may render or
//! the user has to be sent to the login route. Any failure of the identity
//! check counts as "no session"; there is no retry.

use strum::{AsRefStr, EnumIter};
use tracing::{debug, info, warn};

use super::context::{IdentityEvent, Session, SessionContext};
use super::store::SessionStore;
use crate::api::ApiClient;
use crate::errors::{Result, ShortyError};

/// Screens of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
pub enum Route {
    Login,
    Home,
    CreateUrl,
    Analytics,
    Settings,
}

impl Route {
    /// Everything except the login screen needs a session
    pub fn is_protected(self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Outcome of a guarded route activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render `route`; `session` is `None` only for the unprotected login route
    Allow {
        route: Route,
        session: Option<Session>,
    },
    RedirectToLogin,
}

impl GuardDecision {
    pub fn route(&self) -> Route {
        match self {
            GuardDecision::Allow { route, .. } => *route,
            GuardDecision::RedirectToLogin => Route::Login,
        }
    }
}

/// OAuth providers the backend offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OAuthProvider {
    Github,
    Google,
}

impl std::str::FromStr for OAuthProvider {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "google" => Ok(Self::Google),
            _ => Err(format!("Unknown provider: '{}'. Valid: github, google", s)),
        }
    }
}

#[derive(Clone)]
pub struct SessionGuard {
    client: ApiClient,
    context: SessionContext,
    store: Option<SessionStore>,
}

impl SessionGuard {
    pub fn new(client: ApiClient, context: SessionContext) -> Self {
        Self {
            client,
            context,
            store: None,
        }
    }

    /// Persist verified sessions to `store` and clear it on logout
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Load the persisted token into the client
    ///
    /// The stored session is not trusted until [`SessionGuard::check`]
    /// confirms it with the backend.
    pub fn restore(&self) -> Result<Option<Session>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let stored = store.load()?;
        if let Some(ref session) = stored {
            self.client.set_session_token(Some(&session.token));
            debug!("Restored session token for {}", session.username);
        }
        Ok(stored)
    }

    /// Ask the backend who we are and publish the answer
    ///
    /// Returns the session the context holds afterwards. When an identity
    /// event arrived while the request was in flight, that event wins and
    /// the (older) answer of this check is dropped.
    pub async fn check(&self) -> Option<Session> {
        let started = self.context.generation();
        let outcome = match self.client.me().await {
            Ok(identity) => {
                let token = self.client.session_token().unwrap_or_default();
                Some(Session::new(token, identity))
            }
            Err(e) => {
                debug!("Identity check failed, treating as signed out: {}", e);
                None
            }
        };

        if self.context.publish_if_unchanged(started, outcome.clone())
            && let (Some(session), Some(store)) = (&outcome, &self.store)
            && let Err(e) = store.save(session)
        {
            warn!("Failed to persist session: {}", e);
        }
        self.context.current()
    }

    /// Guard one route activation
    pub async fn activate(&self, route: Route) -> GuardDecision {
        if !route.is_protected() {
            return GuardDecision::Allow {
                route,
                session: self.context.current(),
            };
        }
        match self.check().await {
            Some(session) => GuardDecision::Allow {
                route,
                session: Some(session),
            },
            None => {
                info!("No session, redirecting {} to login", route.as_ref());
                GuardDecision::RedirectToLogin
            }
        }
    }

    /// Apply a push notification from the identity source
    pub fn handle_event(&self, event: IdentityEvent) {
        match &event {
            IdentityEvent::SignedIn(session) => {
                self.client.set_session_token(Some(&session.token));
            }
            IdentityEvent::SignedOut => self.client.set_session_token(None),
        }
        self.context.publish(event);
    }

    /// Browser URL starting the OAuth flow
    pub fn login_url(&self, provider: OAuthProvider) -> String {
        self.client.login_url(provider.as_ref())
    }

    /// Adopt a session token obtained from the browser login
    pub async fn login_with_token(&self, token: &str) -> Result<Session> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ShortyError::validation("Please paste a session token"));
        }

        self.client.set_session_token(Some(token));
        match self.client.me().await {
            Ok(identity) => {
                let token = self.client.session_token().unwrap_or_else(|| token.to_string());
                let session = Session::new(token, identity);
                if let Some(store) = &self.store {
                    store.save(&session)?;
                }
                self.context
                    .publish(IdentityEvent::SignedIn(session.clone()));
                info!("Logged in as {}", session.display_name());
                Ok(session)
            }
            Err(e) => {
                self.client.set_session_token(None);
                Err(ShortyError::unauthenticated(format!(
                    "Session token was not accepted: {}",
                    e.message()
                )))
            }
        }
    }

    /// Forget the session locally and notify subscribers
    pub fn logout(&self) -> Result<()> {
        self.handle_event(IdentityEvent::SignedOut);
        if let Some(store) = &self.store {
            store.clear()?;
        }
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiResponse, ScriptedTransport};
    use crate::config::ApiConfig;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn guard_with(transport: Arc<ScriptedTransport>) -> SessionGuard {
        let client = ApiClient::new(&ApiConfig::default(), transport).unwrap();
        SessionGuard::new(client, SessionContext::new())
    }

    #[tokio::test]
    async fn test_login_route_is_never_gated() {
        let transport = Arc::new(ScriptedTransport::new());
        let guard = guard_with(transport.clone());
        let decision = guard.activate(Route::Login).await;
        assert_eq!(
            decision,
            GuardDecision::Allow {
                route: Route::Login,
                session: None
            }
        );
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_session_allows_route() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(200, json!({"username": "ada"})));
        let guard = guard_with(transport);

        let decision = guard.activate(Route::Analytics).await;
        assert_eq!(decision.route(), Route::Analytics);
        assert_eq!(guard.context().current().unwrap().username, "ada");
    }

    #[tokio::test]
    async fn test_transport_failure_redirects_without_retry() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_error(ShortyError::transport("connection refused"));
        let guard = guard_with(transport.clone());

        assert_eq!(
            guard.activate(Route::Home).await,
            GuardDecision::RedirectToLogin
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_during_check_wins() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(200, json!({"username": "ada"})));
        transport.set_delay(Some(Duration::from_millis(50)));
        let guard = guard_with(transport);

        let checker = guard.clone();
        let pending = tokio::spawn(async move { checker.activate(Route::Settings).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        guard.handle_event(IdentityEvent::SignedOut);

        assert_eq!(pending.await.unwrap(), GuardDecision::RedirectToLogin);
        assert!(guard.context().current().is_none());
    }

    #[tokio::test]
    async fn test_login_with_empty_token_sends_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let guard = guard_with(transport.clone());
        assert!(matches!(
            guard.login_with_token("   ").await,
            Err(ShortyError::Validation(_))
        ));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_rejected_token_is_dropped() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::new(401, ""));
        let guard = guard_with(transport);

        let err = guard.login_with_token("bad").await.unwrap_err();
        assert!(matches!(err, ShortyError::Unauthenticated(_)));
        assert!(guard.client().session_token().is_none());
        assert!(!guard.context().is_signed_in());
    }

    #[test]
    fn test_provider_parsing() {
        use std::str::FromStr;
        assert_eq!(OAuthProvider::from_str("GitHub").unwrap(), OAuthProvider::Github);
        assert_eq!(OAuthProvider::Google.as_ref(), "google");
        assert!(OAuthProvider::from_str("gitlab").is_err());
    }
}
