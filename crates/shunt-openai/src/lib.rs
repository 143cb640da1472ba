// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI cloud backend for the shunt hybrid router.
//!
//! Implements [`InferenceBackend`] over the Chat Completions API. Token
//! counts come from the API's usage block.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use shunt_config::ShuntConfig;
use shunt_core::{
    BackendReply, BackendRequest, HealthStatus, InferenceBackend, Provider, ShuntError,
};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionMessage, ChatCompletionRequest};

/// OpenAI backend implementing [`InferenceBackend`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiBackend {
    client: OpenAiClient,
    max_tokens: u32,
}

impl OpenAiBackend {
    /// Creates a new OpenAI backend from the given configuration.
    pub fn new(config: &ShuntConfig) -> Result<Self, ShuntError> {
        let api_key = resolve_api_key(&config.openai.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            &config.openai.base_url,
            Duration::from_secs(config.openai.timeout_secs),
        )?;

        info!(base_url = config.openai.base_url, "OpenAI backend initialized");

        Ok(Self {
            client,
            max_tokens: config.openai.max_tokens,
        })
    }
}

#[async_trait]
impl InferenceBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn health_check(&self) -> Result<HealthStatus, ShuntError> {
        // A lightweight check only: a full check would make an API call and
        // consume tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn complete(&self, request: BackendRequest) -> Result<BackendReply, ShuntError> {
        let api_request = ChatCompletionRequest {
            model: request.model,
            messages: vec![ChatCompletionMessage::user(request.prompt)],
            max_tokens: request.max_output_tokens.unwrap_or(self.max_tokens),
        };

        let response = self.client.complete_chat(&api_request).await?;
        debug!(
            id = response.id,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            "completion received"
        );

        Ok(BackendReply {
            text: response.text(),
            input_tokens: Some(response.usage.prompt_tokens),
            output_tokens: Some(response.usage.completion_tokens),
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

    std::env::var("OPENAI_API_KEY").map_err(|_| {
        ShuntError::Config(
            "OpenAI API key not found. Set openai.api_key in config or OPENAI_API_KEY environment variable.".into(),
        )
    })
}
