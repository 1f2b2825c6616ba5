//! Link creation flow
//!
//! Form validation happens before anything is sent. A form accepts one
//! submission at a time; the response is interpreted according to the
//! configured [`ResponseContract`].

use serde_json::Value;
use strum::AsRefStr;
use tracing::{debug, info, warn};

use crate::api::types::error_message;
use crate::api::{ApiClient, ApiResponse, CreateLinkPayload, body_or_invalid};
use crate::config::ResponseContract;
use crate::errors::{Result, ShortyError};
use crate::session::Session;

pub const MSG_EMPTY_URL: &str = "Please enter a URL to shorten";
pub const MSG_EMPTY_ALIAS: &str = "Please enter a custom alias";
pub const MSG_SHORTENED: &str = "URL shortened successfully!";
pub const MSG_MISSING_SHORT_URL: &str = "Malformed response: missing short_url";
pub const MSG_LENIENT_FALLBACK: &str = "URL processed, but the response had no short_url field";

/// Fields the lenient contract accepts, in order of preference
const LENIENT_URL_FIELDS: [&str; 3] = ["short_url", "shortened_url", "url"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AliasMode {
    #[default]
    Generated,
    Custom,
}

impl AliasMode {
    pub fn toggle(self) -> Self {
        match self {
            AliasMode::Generated => AliasMode::Custom,
            AliasMode::Custom => AliasMode::Generated,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedbackStatus {
    #[default]
    None,
    Success,
    Error,
}

/// What the form currently displays below the inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub status: FeedbackStatus,
    pub message: String,
    pub short_url: Option<String>,
}

impl Feedback {
    fn error(message: impl Into<String>) -> Self {
        Self {
            status: FeedbackStatus::Error,
            message: message.into(),
            short_url: None,
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    /// `None` only under the lenient contract when nothing URL-like was found
    pub short_url: Option<String>,
    pub message: String,
}

/// Transient form state owned by the create screen
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub destination_url: String,
    pub alias_mode: AliasMode,
    pub custom_alias: String,
    pending: bool,
    feedback: Feedback,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    /// Check the inputs without touching any state
    pub fn validate(&self) -> Result<()> {
        if self.destination_url.trim().is_empty() {
            return Err(ShortyError::validation(MSG_EMPTY_URL));
        }
        if self.alias_mode == AliasMode::Custom && self.custom_alias.trim().is_empty() {
            return Err(ShortyError::validation(MSG_EMPTY_ALIAS));
        }
        Ok(())
    }

    /// Request payload for the current inputs
    pub fn payload(&self, session: Option<&Session>) -> CreateLinkPayload {
        let custom_code = match self.alias_mode {
            AliasMode::Custom => Some(self.custom_alias.trim().to_string()),
            AliasMode::Generated => None,
        };
        CreateLinkPayload {
            original_url: self.destination_url.trim().to_string(),
            custom_code,
            email: session.and_then(|s| s.email.clone()),
            username: session.map(|s| s.username.clone()),
        }
    }

    /// Validate and mark the form pending
    ///
    /// Fails with [`ShortyError::Busy`] while a previous submission is in
    /// flight, and with [`ShortyError::Validation`] (shown as feedback) on
    /// bad input. Either way no request must be sent.
    pub fn begin_submit(&mut self, session: Option<&Session>) -> Result<CreateLinkPayload> {
        if self.pending {
            return Err(ShortyError::busy("A submission is already in progress"));
        }
        if let Err(e) = self.validate() {
            self.feedback = Feedback::error(e.message());
            return Err(e);
        }
        self.pending = true;
        self.feedback = Feedback::default();
        Ok(self.payload(session))
    }

    /// Apply the outcome of the submission started by [`CreateForm::begin_submit`]
    pub fn finish(&mut self, outcome: &Result<CreatedLink>) {
        self.pending = false;
        self.feedback = match outcome {
            Ok(link) => Feedback {
                status: FeedbackStatus::Success,
                message: link.message.clone(),
                short_url: link.short_url.clone(),
            },
            Err(e) if e.is_cancelled() => Feedback::default(),
            Err(e) => Feedback::error(feedback_message(e)),
        };
    }

    /// Clear inputs, result and messages
    pub fn reset(&mut self) {
        self.destination_url.clear();
        self.custom_alias.clear();
        self.feedback = Feedback::default();
    }
}

/// Text shown to the user for a failed submission
pub fn feedback_message(error: &ShortyError) -> String {
    match error {
        ShortyError::Transport(reason) => format!("API Error: {}", reason),
        other => other.message().to_string(),
    }
}

#[derive(Clone)]
pub struct LinkCreationFlow {
    client: ApiClient,
    contract: ResponseContract,
}

impl LinkCreationFlow {
    pub fn new(client: ApiClient, contract: ResponseContract) -> Self {
        Self { client, contract }
    }

    pub fn contract(&self) -> ResponseContract {
        self.contract
    }

    /// Run one submission of `form` end to end
    pub async fn submit(
        &self,
        form: &mut CreateForm,
        session: Option<&Session>,
    ) -> Result<CreatedLink> {
        let payload = form.begin_submit(session)?;
        let outcome = self.send(&payload).await;
        form.finish(&outcome);
        outcome
    }

    /// Post `payload` and interpret the answer; never retries
    pub async fn send(&self, payload: &CreateLinkPayload) -> Result<CreatedLink> {
        debug!(
            "Shortening {} (custom code: {:?})",
            payload.original_url, payload.custom_code
        );
        let response = self.client.shorten(payload).await?;
        let created = interpret_response(self.contract, &response)?;
        info!("Short link created: {:?}", created.short_url);
        Ok(created)
    }
}

/// Map a `/api/shorten/` response onto the outcome shown by the form
pub fn interpret_response(
    contract: ResponseContract,
    response: &ApiResponse,
) -> Result<CreatedLink> {
    if !response.is_success() {
        let body = body_or_invalid(response);
        let message = error_message(&body)
            .unwrap_or_else(|| format!("Server error: {}", response.status));
        return Err(ShortyError::http_status(response.status, message));
    }

    match contract {
        ResponseContract::Canonical => {
            let short_url = response
                .body_json()
                .as_ref()
                .and_then(|body| string_field(body, "short_url"))
                .ok_or_else(|| ShortyError::malformed_response(MSG_MISSING_SHORT_URL))?;
            Ok(CreatedLink {
                short_url: Some(short_url),
                message: MSG_SHORTENED.to_string(),
            })
        }
        ResponseContract::Lenient => {
            let body = body_or_invalid(response);
            if let Some(url) = LENIENT_URL_FIELDS
                .iter()
                .find_map(|field| string_field(&body, field))
            {
                return Ok(CreatedLink {
                    short_url: Some(url),
                    message: MSG_SHORTENED.to_string(),
                });
            }
            warn!("Shorten response has no URL field, scanning body");
            Ok(CreatedLink {
                short_url: scan_for_url(&response.body),
                message: MSG_LENIENT_FALLBACK.to_string(),
            })
        }
    }
}

fn string_field(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// First `http://` or `https://` run in `text`, up to whitespace or `"`
pub fn scan_for_url(text: &str) -> Option<String> {
    let start = match (text.find("http://"), text.find("https://")) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '"')
        .unwrap_or(rest.len());
    let candidate = &rest[..end];
    // 只有协议头不算
    if candidate.ends_with("://") {
        return None;
    }
    Some(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_order() {
        let mut form = CreateForm::new();
        form.alias_mode = AliasMode::Custom;
        assert_eq!(form.validate(), Err(ShortyError::validation(MSG_EMPTY_URL)));

        form.destination_url = "  https://example.com ".into();
        form.custom_alias = "   ".into();
        assert_eq!(
            form.validate(),
            Err(ShortyError::validation(MSG_EMPTY_ALIAS))
        );

        form.alias_mode = AliasMode::Generated;
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_payload_fields() {
        let mut form = CreateForm::new();
        form.destination_url = " https://example.com/long ".into();
        form.custom_alias = "mine".into();
        let payload = form.payload(None);
        assert_eq!(payload.original_url, "https://example.com/long");
        assert_eq!(payload.custom_code, None);
        assert_eq!(payload.username, None);

        form.alias_mode = AliasMode::Custom;
        assert_eq!(form.payload(None).custom_code.as_deref(), Some("mine"));
    }

    #[test]
    fn test_pending_rejects_second_submit() {
        let mut form = CreateForm::new();
        form.destination_url = "https://example.com".into();
        assert!(form.begin_submit(None).is_ok());
        assert!(matches!(form.begin_submit(None), Err(ShortyError::Busy(_))));

        form.finish(&Err(ShortyError::transport("connection reset")));
        assert!(!form.is_pending());
        assert_eq!(form.feedback().message, "API Error: connection reset");
    }

    #[test]
    fn test_reset_keeps_alias_mode() {
        let mut form = CreateForm::new();
        form.destination_url = "x".into();
        form.alias_mode = AliasMode::Custom;
        form.custom_alias = "y".into();
        form.finish(&Ok(CreatedLink {
            short_url: Some("http://x/y".into()),
            message: MSG_SHORTENED.into(),
        }));
        form.reset();
        assert!(form.destination_url.is_empty());
        assert!(form.custom_alias.is_empty());
        assert_eq!(form.feedback(), &Feedback::default());
        assert_eq!(form.alias_mode, AliasMode::Custom);
    }

    #[test]
    fn test_error_body_fields() {
        let resp = ApiResponse::json(400, json!({"error": "bad code", "detail": "ignored"}));
        let err = interpret_response(ResponseContract::Canonical, &resp).unwrap_err();
        assert_eq!(err.message(), "bad code");

        let resp = ApiResponse::json(409, json!({"message": "taken", "error": "x"}));
        let err = interpret_response(ResponseContract::Canonical, &resp).unwrap_err();
        assert_eq!(err.message(), "taken");

        let resp = ApiResponse::json(500, json!({}));
        let err = interpret_response(ResponseContract::Canonical, &resp).unwrap_err();
        assert_eq!(err.message(), "Server error: 500");

        let resp = ApiResponse::new(502, "<html>gateway</html>");
        let err = interpret_response(ResponseContract::Lenient, &resp).unwrap_err();
        assert_eq!(err.message(), "Invalid response format");
    }

    #[test]
    fn test_canonical_requires_short_url() {
        let resp = ApiResponse::json(201, json!({"shortened_url": "http://x/abc"}));
        let err = interpret_response(ResponseContract::Canonical, &resp).unwrap_err();
        assert_eq!(err, ShortyError::malformed_response(MSG_MISSING_SHORT_URL));
    }

    #[test]
    fn test_lenient_field_order_and_scan() {
        let resp = ApiResponse::json(200, json!({"url": "http://x/u", "shortened_url": "http://x/s"}));
        let link = interpret_response(ResponseContract::Lenient, &resp).unwrap();
        assert_eq!(link.short_url.as_deref(), Some("http://x/s"));

        let resp = ApiResponse::json(200, json!({"data": {"link": "https://sho.rt/q1"}}));
        let link = interpret_response(ResponseContract::Lenient, &resp).unwrap();
        assert_eq!(link.short_url.as_deref(), Some("https://sho.rt/q1"));
        assert_eq!(link.message, MSG_LENIENT_FALLBACK);

        let resp = ApiResponse::json(200, json!({"ok": true}));
        let link = interpret_response(ResponseContract::Lenient, &resp).unwrap();
        assert_eq!(link.short_url, None);
    }

    #[test]
    fn test_scan_for_url() {
        assert_eq!(
            scan_for_url("see https://a.b/c and http://d.e").as_deref(),
            Some("https://a.b/c")
        );
        assert_eq!(scan_for_url("x http://a.b/c\"y").as_deref(), Some("http://a.b/c"));
        assert_eq!(scan_for_url("nothing here"), None);
        assert_eq!(scan_for_url("broken http://"), None);
    }
}
