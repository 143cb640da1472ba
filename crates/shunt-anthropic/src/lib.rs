// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude cloud backend for the shunt hybrid router.
//!
//! This crate implements [`InferenceBackend`] for the Anthropic Messages API.
//! Token counts come straight from the API's usage block, so cloud-side cost
//! math never relies on estimates.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use shunt_config::ShuntConfig;
use shunt_core::{
    BackendReply, BackendRequest, HealthStatus, InferenceBackend, Provider, ShuntError,
};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Anthropic Claude backend implementing [`InferenceBackend`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicBackend {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicBackend {
    /// Creates a new Anthropic backend from the given configuration.
    pub fn new(config: &ShuntConfig) -> Result<Self, ShuntError> {
        let api_key = resolve_api_key(&config.anthropic.api_key)?;
        let client = AnthropicClient::new(
            &api_key,
            &config.anthropic.api_version,
            Duration::from_secs(config.anthropic.timeout_secs),
        )?;

        info!(
            api_version = config.anthropic.api_version,
            "Anthropic backend initialized"
        );

        Ok(Self {
            client,
            max_tokens: config.anthropic.max_tokens,
        })
    }

    /// Creates a backend with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }
}

#[async_trait]
impl InferenceBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn health_check(&self) -> Result<HealthStatus, ShuntError> {
        // A lightweight check only: a full check would make an API call and
        // consume tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn complete(&self, request: BackendRequest) -> Result<BackendReply, ShuntError> {
        let api_request = MessageRequest {
            model: request.model,
            messages: vec![ApiMessage::user(request.prompt)],
            max_tokens: request.max_output_tokens.unwrap_or(self.max_tokens),
            stream: false,
        };

        let response = self.client.complete_message(&api_request).await?;
        debug!(
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "completion received"
        );

        Ok(BackendReply {
            text: response.text(),
            input_tokens: Some(response.usage.input_tokens),
            output_tokens: Some(response.usage.output_tokens),
        })
    }
}

/// Resolves the API key from config, falling back to the environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ShuntError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        ShuntError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}
