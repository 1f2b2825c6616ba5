//! HTTP transport abstraction
//!
//! The flows only see [`HttpTransport`]. The production implementation is
//! [`UreqTransport`]; [`ScriptedTransport`] answers from memory and is used
//! for offline runs and tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace, warn};
use ureq::Agent;

use crate::errors::{Result, ShortyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        let mut req = Self::new(Method::Post, url);
        req.body = Some(body);
        req
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Path component of the URL, without query
    pub fn path(&self) -> &str {
        let after_scheme = self
            .url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.url);
        let path = after_scheme
            .find('/')
            .map(|i| &after_scheme[i..])
            .unwrap_or("/");
        path.split('?').next().unwrap_or(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub set_cookies: Vec<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            set_cookies: Vec::new(),
            body: body.into(),
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn with_set_cookie(mut self, cookie: &str) -> Self {
        self.set_cookies.push(cookie.to_string());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body parsed as JSON, `None` when it is not JSON
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Request/response transport
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one request. Non-2xx statuses are responses, not errors;
    /// only transport failures return `Err`.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Transport name (for logs)
    fn name(&self) -> &'static str;
}

// ============ ureq ============

/// Blocking `ureq` agent driven from `spawn_blocking`
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    fn execute_blocking(agent: &Agent, request: ApiRequest) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let result = match method {
            Method::Get => {
                let mut builder = agent.get(&url);
                for (k, v) in &query {
                    builder = builder.query(k, v);
                }
                for (k, v) in &headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                builder.call()
            }
            Method::Delete => {
                let mut builder = agent.delete(&url);
                for (k, v) in &query {
                    builder = builder.query(k, v);
                }
                for (k, v) in &headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                builder.call()
            }
            Method::Post => {
                let mut builder = agent.post(&url);
                for (k, v) in &query {
                    builder = builder.query(k, v);
                }
                for (k, v) in &headers {
                    builder = builder.header(k.as_str(), v.as_str());
                }
                match body {
                    Some(body) => builder.send_json(&body),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
            ShortyError::transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ShortyError::transport(format!("Failed to read body: {}", e)))?;

        trace!("{} {} -> {} ({} bytes)", method, url, status, body.len());
        Ok(ApiResponse {
            status,
            set_cookies,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let agent = self.agent.clone();
        debug!("{} {}", request.method, request.url);
        tokio::task::spawn_blocking(move || Self::execute_blocking(&agent, request))
            .await
            .map_err(|e| ShortyError::transport(format!("HTTP worker failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "ureq"
    }
}

// ============ Scripted ============

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync;

enum Script {
    Queue(VecDeque<Result<ApiResponse>>),
    Handler(Arc<Handler>),
}

/// In-memory transport answering from a queue or a handler function
///
/// Every request is recorded so callers can assert on what was sent.
pub struct ScriptedTransport {
    script: Mutex<Script>,
    requests: Mutex<Vec<ApiRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedTransport {
    /// Empty queue; an unscripted request fails with a transport error
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script::Queue(VecDeque::new())),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Answer every request through `handler`
    pub fn from_fn<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Self {
            script: Mutex::new(Script::Handler(Arc::new(handler))),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    pub fn push_response(&self, response: ApiResponse) -> &Self {
        self.push(Ok(response))
    }

    pub fn push_error(&self, error: ShortyError) -> &Self {
        self.push(Err(error))
    }

    fn push(&self, item: Result<ApiResponse>) -> &Self {
        let mut script = self.script.lock();
        match &mut *script {
            Script::Queue(queue) => queue.push_back(item),
            Script::Handler(_) => {
                *script = Script::Queue(VecDeque::from([item]));
            }
        }
        self
    }

    /// Delay every answer (simulates a slow backend)
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// Requests sent so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request.clone());

        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let handler = {
            let mut script = self.script.lock();
            match &mut *script {
                Script::Queue(queue) => {
                    return queue.pop_front().unwrap_or_else(|| {
                        Err(ShortyError::transport(format!(
                            "no scripted response for {} {}",
                            request.method,
                            request.path()
                        )))
                    });
                }
                Script::Handler(handler) => handler.clone(),
            }
        };
        handler(&request)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
