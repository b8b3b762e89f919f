//! HttpLifecycleClient -- concrete [`LifecycleEndpoint`] over the control
//! plane's REST API.
//!
//! Covers version creation, build status polling, alias listing/update, and
//! bot metadata lookup. A 404 from any operation maps to
//! [`LifecycleError::NotFound`]; during build polling the driver treats that
//! as "still building", everywhere else it is a hard failure.

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use colloquy_core::endpoint::LifecycleEndpoint;
use colloquy_types::error::LifecycleError;
use colloquy_types::lifecycle::{AliasBinding, AliasSummary, BotInfo, BuildJob, VersionSource};

use super::wire::{
    self, AliasLocaleSetting, CreateVersionRequest, LocaleVersionSource, UpdateAliasRequest,
};

/// Control-plane HTTP client.
pub struct HttpLifecycleClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl HttpLifecycleClient {
    /// Create a new control-plane client for a region.
    pub fn new(api_key: SecretString, region: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: format!("https://admin.{region}.colloquy.cloud"),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response onto the error taxonomy, preserving the
    /// service's literal error message when the body carries one.
    async fn error_from_response(response: reqwest::Response) -> LifecycleError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return LifecycleError::NotFound;
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %body, "Control plane error response");
        let message = serde_json::from_str::<wire::ApiError>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {status}: {body}"));
        LifecycleError::Service { message }
    }

    fn transport(e: reqwest::Error) -> LifecycleError {
        LifecycleError::Transport {
            message: format!("HTTP request failed: {e}"),
        }
    }

    fn deserialization(e: impl std::fmt::Display) -> LifecycleError {
        LifecycleError::Deserialization(e.to_string())
    }
}

impl LifecycleEndpoint for HttpLifecycleClient {
    async fn create_version(
        &self,
        bot_id: &str,
        locale_id: &str,
        source: VersionSource,
        description: &str,
    ) -> Result<BuildJob, LifecycleError> {
        let url = self.url(&format!("/v1/bots/{bot_id}/versions"));
        let mut locale_specification = HashMap::new();
        locale_specification.insert(
            locale_id.to_string(),
            LocaleVersionSource {
                source_version: source,
            },
        );
        let body = CreateVersionRequest {
            description: description.to_string(),
            locale_specification,
        };

        let response = self
            .client
            .put(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: wire::VersionResponse =
            response.json().await.map_err(Self::deserialization)?;
        parsed.into_build_job().map_err(Self::deserialization)
    }

    async fn describe_version(
        &self,
        bot_id: &str,
        version: &str,
    ) -> Result<BuildJob, LifecycleError> {
        let url = self.url(&format!("/v1/bots/{bot_id}/versions/{version}"));

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: wire::VersionResponse =
            response.json().await.map_err(Self::deserialization)?;
        parsed.into_build_job().map_err(Self::deserialization)
    }

    async fn list_aliases(&self, bot_id: &str) -> Result<Vec<AliasSummary>, LifecycleError> {
        let url = self.url(&format!("/v1/bots/{bot_id}/aliases"));

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: wire::ListAliasesResponse =
            response.json().await.map_err(Self::deserialization)?;
        Ok(parsed
            .alias_summaries
            .into_iter()
            .map(wire::WireAliasSummary::into_summary)
            .collect())
    }

    async fn update_alias(
        &self,
        bot_id: &str,
        alias_id: &str,
        alias_name: &str,
        version: &str,
        locale_id: &str,
    ) -> Result<AliasBinding, LifecycleError> {
        let url = self.url(&format!("/v1/bots/{bot_id}/aliases/{alias_id}"));
        let mut locale_settings = HashMap::new();
        locale_settings.insert(locale_id.to_string(), AliasLocaleSetting { enabled: true });
        let body = UpdateAliasRequest {
            alias_name: alias_name.to_string(),
            version: version.to_string(),
            locale_settings,
        };

        let response = self
            .client
            .put(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: wire::UpdateAliasResponse =
            response.json().await.map_err(Self::deserialization)?;
        parsed.into_binding().map_err(Self::deserialization)
    }

    async fn describe_bot(&self, bot_id: &str) -> Result<BotInfo, LifecycleError> {
        let url = self.url(&format!("/v1/bots/{bot_id}"));

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let parsed: wire::BotResponse = response.json().await.map_err(Self::deserialization)?;
        Ok(parsed.into_info())
    }
}
