//! Typed client for the shortener backend
//!
//! Owns the cookie jar and the auth scheme; every call goes through
//! [`ApiClient::send`] so cookies and bearer headers are applied in one place.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::constants::{
    ANALYTICS_PATH, CSRF_HEADER, CSRF_PATH, ME_PATH, SHORTEN_PATH, UPDATE_PROFILE_PATH,
    analytics_item_path, oauth_login_path,
};
use super::cookies::CookieJar;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, UreqTransport};
use super::types::{
    CreateLinkPayload, MeResponse, ProfileUpdatePayload, ShortLink, error_message,
};
use crate::config::{ApiConfig, AuthScheme};
use crate::errors::{Result, ShortyError};

/// Identity reported by `/api/me/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    jar: Arc<CookieJar>,
    auth_scheme: AuthScheme,
    session_cookie: String,
    csrf_cookie: String,
}

impl ApiClient {
    /// Client over an arbitrary transport
    pub fn new(config: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let parsed = url::Url::parse(&config.base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ShortyError::config(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }
        debug!(
            "API client for {} via {} transport",
            config.base_url,
            transport.name()
        );
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
            jar: Arc::new(CookieJar::new()),
            auth_scheme: config.auth_scheme,
            session_cookie: config.session_cookie.clone(),
            csrf_cookie: config.csrf_cookie.clone(),
        })
    }

    /// Client over the real HTTP transport
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let transport = UreqTransport::new(Duration::from_secs(config.timeout_secs));
        Self::new(config, Arc::new(transport))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Browser URL that starts the OAuth login for `provider`
    pub fn login_url(&self, provider: &str) -> String {
        self.url(&oauth_login_path(provider))
    }

    // ============ Session token ============

    /// Install (or drop) the session token used for every request
    pub fn set_session_token(&self, token: Option<&str>) {
        match token {
            Some(token) => self.jar.set(&self.session_cookie, token),
            None => self.jar.clear(),
        }
    }

    pub fn session_token(&self) -> Option<String> {
        self.jar.get(&self.session_cookie)
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.jar
    }

    // ============ Transport ============

    /// Send a request with cookies and auth applied, absorbing `Set-Cookie`
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        if let Some(cookie) = self.jar.header_value() {
            request = request.with_header("Cookie", &cookie);
        }
        if self.auth_scheme == AuthScheme::Bearer
            && let Some(token) = self.session_token()
        {
            request = request.with_header("Authorization", &format!("Bearer {}", token));
        }
        request = request.with_header("Accept", "application/json");

        let response = self.transport.send(request).await?;
        for cookie in &response.set_cookies {
            self.jar.absorb(cookie);
        }
        Ok(response)
    }

    // ============ Endpoints ============

    /// `GET /api/me/`
    ///
    /// Anything other than a 2xx carrying a non-empty `username` is an error.
    pub async fn me(&self) -> Result<Identity> {
        let response = self.send(ApiRequest::get(self.url(ME_PATH))).await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        let me: MeResponse = serde_json::from_str(&response.body).map_err(|e| {
            ShortyError::malformed_response(format!("Invalid /api/me/ body: {}", e))
        })?;
        match me.username.filter(|u| !u.trim().is_empty()) {
            Some(username) => Ok(Identity {
                username,
                email: me.email.filter(|e| !e.is_empty()),
            }),
            None => Err(ShortyError::unauthenticated(
                "Identity response has no username",
            )),
        }
    }

    /// `POST /api/shorten/`; the raw response is interpreted by the creation flow
    pub async fn shorten(&self, payload: &CreateLinkPayload) -> Result<ApiResponse> {
        let body = serde_json::to_value(payload)?;
        self.send(ApiRequest::post(self.url(SHORTEN_PATH), body))
            .await
    }

    /// `GET /api/analytics/?username=<username>`
    pub async fn list_links(&self, username: &str) -> Result<Vec<ShortLink>> {
        let request = ApiRequest::get(self.url(ANALYTICS_PATH)).with_query("username", username);
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        serde_json::from_str(&response.body).map_err(|e| {
            ShortyError::malformed_response(format!("Invalid /api/analytics/ body: {}", e))
        })
    }

    /// `GET /api/csrf/`, returning the CSRF cookie the backend set
    pub async fn fetch_csrf_token(&self) -> Result<Option<String>> {
        let response = self.send(ApiRequest::get(self.url(CSRF_PATH))).await?;
        if !response.is_success() {
            warn!("CSRF endpoint answered {}", response.status);
        }
        Ok(self.jar.get(&self.csrf_cookie))
    }

    /// `DELETE /api/analytics/{short_code}/` guarded by the CSRF header
    pub async fn delete_link(&self, short_code: &str) -> Result<()> {
        let token = self.fetch_csrf_token().await?;
        let mut request = ApiRequest::delete(self.url(&analytics_item_path(short_code)));
        match token {
            Some(token) => request = request.with_header(CSRF_HEADER, &token),
            None => warn!("No CSRF cookie available, deleting without {}", CSRF_HEADER),
        }
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(status_error(&response));
        }
        Ok(())
    }

    /// `POST /api/update-profile/`; the raw response is interpreted by the profile flow
    pub async fn update_profile(&self, email: &str) -> Result<ApiResponse> {
        let body = serde_json::to_value(ProfileUpdatePayload {
            email: email.to_string(),
        })?;
        self.send(ApiRequest::post(self.url(UPDATE_PROFILE_PATH), body))
            .await
    }
}

/// Non-2xx response as an error, using the body's message when it has one
pub fn status_error(response: &ApiResponse) -> ShortyError {
    let message = response
        .body_json()
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| format!("Server error: {}", response.status));
    ShortyError::http_status(response.status, message)
}

/// Parsed body or the stand-in used for non-JSON bodies
pub fn body_or_invalid(response: &ApiResponse) -> Value {
    response
        .body_json()
        .unwrap_or_else(|| serde_json::json!({ "error": "Invalid response format" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{Method, ScriptedTransport};
    use serde_json::json;

    fn client_with(transport: Arc<ScriptedTransport>, scheme: AuthScheme) -> ApiClient {
        let config = ApiConfig {
            auth_scheme: scheme,
            base_url: "http://localhost:8000/".into(),
            ..Default::default()
        };
        ApiClient::new(&config, transport).unwrap()
    }

    #[test]
    fn test_rejects_non_http_base() {
        let config = ApiConfig {
            base_url: "file:///tmp".into(),
            ..Default::default()
        };
        let result = ApiClient::new(&config, Arc::new(ScriptedTransport::new()));
        assert!(matches!(result, Err(ShortyError::Config(_))));
    }

    #[test]
    fn test_login_url_trims_trailing_slash() {
        let client = client_with(Arc::new(ScriptedTransport::new()), AuthScheme::Cookie);
        assert_eq!(
            client.login_url("github"),
            "http://localhost:8000/accounts/github/login/"
        );
    }

    #[tokio::test]
    async fn test_me_success() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(
            200,
            json!({"username": "ada", "email": "ada@example.com"}),
        ));
        let client = client_with(transport.clone(), AuthScheme::Cookie);
        client.set_session_token(Some("s3cr3t"));

        let identity = client.me().await.unwrap();
        assert_eq!(identity.username, "ada");
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "http://localhost:8000/api/me/");
        assert_eq!(sent.header("Cookie"), Some("sessionid=s3cr3t"));
        assert_eq!(sent.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_me_missing_username() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(200, json!({"email": "x@y.z"})));
        let client = client_with(transport, AuthScheme::Cookie);
        assert!(matches!(
            client.me().await,
            Err(ShortyError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn test_me_non_success() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(403, json!({"detail": "Not logged in"})));
        let client = client_with(transport, AuthScheme::Cookie);
        let err = client.me().await.unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.message(), "Not logged in");
    }

    #[tokio::test]
    async fn test_bearer_scheme_sets_authorization() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(200, json!({"short_url": "http://x/a"})));
        let client = client_with(transport.clone(), AuthScheme::Bearer);
        client.set_session_token(Some("tok"));

        client
            .shorten(&CreateLinkPayload {
                original_url: "https://example.com".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let sent = &transport.requests()[0];
        assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
        assert_eq!(
            sent.body,
            Some(json!({"original_url": "https://example.com"}))
        );
    }

    #[tokio::test]
    async fn test_list_links_sends_username_query() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::json(
            200,
            json!([{"original_url": "https://a.b", "short_code": "abc", "clicks": 4}]),
        ));
        let client = client_with(transport.clone(), AuthScheme::Cookie);

        let links = client.list_links("ada").await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].clicks, 4);
        assert_eq!(
            transport.requests()[0].query,
            vec![("username".to_string(), "ada".to_string())]
        );
    }

    #[tokio::test]
    async fn test_list_links_malformed() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(ApiResponse::new(200, "<html></html>"));
        let client = client_with(transport, AuthScheme::Cookie);
        assert!(matches!(
            client.list_links("ada").await,
            Err(ShortyError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_echoes_csrf_cookie() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_response(
                ApiResponse::json(200, json!({})).with_set_cookie("csrftoken=c5rf; Path=/"),
            )
            .push_response(ApiResponse::new(204, ""));
        let client = client_with(transport.clone(), AuthScheme::Cookie);
        client.set_session_token(Some("sess"));

        client.delete_link("abc123").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].path(), "/api/csrf/");
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].path(), "/api/analytics/abc123/");
        assert_eq!(requests[1].header("X-CSRFToken"), Some("c5rf"));
        assert_eq!(
            requests[1].header("Cookie"),
            Some("csrftoken=c5rf; sessionid=sess")
        );
    }

    #[tokio::test]
    async fn test_delete_failure_status() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_response(ApiResponse::json(200, json!({})))
            .push_response(ApiResponse::new(404, "not json"));
        let client = client_with(transport, AuthScheme::Cookie);
        let err = client.delete_link("gone").await.unwrap_err();
        assert_eq!(err, ShortyError::http_status(404, "Server error: 404"));
    }

    #[test]
    fn test_body_or_invalid() {
        let resp = ApiResponse::new(500, "oops");
        assert_eq!(
            body_or_invalid(&resp),
            json!({"error": "Invalid response format"})
        );
    }
}
