//! HttpConversationClient -- concrete [`ConversationEndpoint`] over the
//! runtime plane's REST API.
//!
//! Sends one recognize-text request per turn with Bearer authentication.
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use colloquy_core::endpoint::ConversationEndpoint;
use colloquy_types::conversation::{RecognizeRequest, Turn};
use colloquy_types::error::ConverseError;

use super::wire::{self, RecognizeTextRequest, RequestSessionState};

/// Runtime-plane HTTP client.
pub struct HttpConversationClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl HttpConversationClient {
    /// Create a new runtime-plane client for a region.
    pub fn new(api_key: SecretString, region: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: format!("https://run.{region}.colloquy.cloud"),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ConversationEndpoint for HttpConversationClient {
    async fn recognize_text(&self, request: &RecognizeRequest) -> Result<Turn, ConverseError> {
        let url = self.url(&format!(
            "/v1/bots/{}/aliases/{}/locales/{}/sessions/{}/text",
            request.bot_id, request.alias_id, request.locale_id, request.session_id
        ));

        let body = RecognizeTextRequest {
            text: request.text.clone(),
            session_state: RequestSessionState {
                session_attributes: request.session_attributes.clone(),
            },
        };

        tracing::debug!(
            session_id = %request.session_id,
            bot_id = %request.bot_id,
            "Recognize text request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ConverseError::Transport {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_body, "Runtime plane error response");
            // Prefer the service's literal error message over the raw body.
            let message = serde_json::from_str::<wire::ApiError>(&error_body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("HTTP {status}: {error_body}"));
            return Err(ConverseError::Service { message });
        }

        let parsed: wire::RecognizeTextResponse = response
            .json()
            .await
            .map_err(|e| ConverseError::Deserialization(format!("failed to parse response: {e}")))?;

        wire::turn_from_wire(&request.text, parsed)
    }
}
