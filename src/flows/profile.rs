//! Profile update (settings screen)

use serde_json::Value;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::session::Session;

pub const MSG_PROFILE_UPDATED: &str = "Your profile has been updated.";
pub const MSG_PROFILE_FAILED: &str = "Failed to update profile.";
pub const MSG_PROFILE_ERROR: &str = "An error occurred while updating the profile.";
pub const MSG_NO_EMAIL: &str = "No user email found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOutcome {
    pub success: bool,
    pub message: String,
}

impl ProfileOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: MSG_PROFILE_UPDATED.to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct ProfileFlow {
    client: ApiClient,
}

impl ProfileFlow {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Push the session's email to the backend
    pub async fn update(&self, session: Option<&Session>) -> ProfileOutcome {
        let Some(email) = session
            .and_then(|s| s.email.as_deref())
            .filter(|e| !e.is_empty())
        else {
            return ProfileOutcome::failed(MSG_NO_EMAIL);
        };

        match self.client.update_profile(email).await {
            Ok(response) if response.is_success() => {
                info!("Profile updated for {}", email);
                ProfileOutcome::ok()
            }
            Ok(response) => {
                let message = response
                    .body_json()
                    .as_ref()
                    .and_then(|body| body.get("error"))
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(MSG_PROFILE_FAILED)
                    .to_string();
                error!("Profile update rejected ({}): {}", response.status, message);
                ProfileOutcome::failed(message)
            }
            Err(e) => {
                error!("Profile update failed: {}", e);
                ProfileOutcome::failed(MSG_PROFILE_ERROR)
            }
        }
    }
}
