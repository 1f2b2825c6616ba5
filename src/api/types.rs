//! Wire types of backend contract v1

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A link owned by the current session, as listed by `/api/analytics/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub original_url: String,
    pub short_code: String,
    #[serde(default)]
    pub clicks: u64,
}

/// `/api/me/` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `/api/shorten/` request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLinkPayload {
    pub original_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// `/api/update-profile/` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdatePayload {
    pub email: String,
}

/// Error message fields, in the order they are looked up
pub const ERROR_MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

/// First non-empty string among `message`, `error`, `detail`
pub fn error_message(body: &Value) -> Option<String> {
    ERROR_MESSAGE_FIELDS
        .iter()
        .filter_map(|field| body.get(field).and_then(Value::as_str))
        .find(|msg| !msg.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_priority() {
        let body = json!({"detail": "d", "error": "e", "message": "m"});
        assert_eq!(error_message(&body).as_deref(), Some("m"));

        let body = json!({"detail": "d", "error": "e"});
        assert_eq!(error_message(&body).as_deref(), Some("e"));

        let body = json!({"detail": "d"});
        assert_eq!(error_message(&body).as_deref(), Some("d"));
    }

    #[test]
    fn test_error_message_skips_empty_and_non_strings() {
        let body = json!({"message": "", "error": {"code": 1}, "detail": "fallback"});
        assert_eq!(error_message(&body).as_deref(), Some("fallback"));
        assert_eq!(error_message(&json!({"status": "bad"})), None);
        assert_eq!(error_message(&json!(["message"])), None);
    }

    #[test]
    fn test_payload_skips_absent_fields() {
        let payload = CreateLinkPayload {
            original_url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"original_url": "https://example.com"})
        );
    }

    #[test]
    fn test_short_link_clicks_default() {
        let link: ShortLink =
            serde_json::from_value(json!({"original_url": "https://a.b", "short_code": "x"}))
                .unwrap();
        assert_eq!(link.clicks, 0);
    }
}
