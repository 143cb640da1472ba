// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local Ollama backend for the shunt hybrid router.
//!
//! This crate implements [`InferenceBackend`] over a local Ollama daemon.
//! Local inference is free, so routing here costs nothing; token counts come
//! from the engine's eval counters when the daemon reports them.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use shunt_config::ShuntConfig;
use shunt_core::{
    BackendReply, BackendRequest, HealthStatus, InferenceBackend, Provider, ShuntError,
};

use crate::client::OllamaClient;
use crate::types::{ChatMessage, ChatOptions, ChatRequest};

/// Ollama backend implementing [`InferenceBackend`].
pub struct OllamaBackend {
    client: OllamaClient,
}

impl OllamaBackend {
    /// Creates a new Ollama backend from the given configuration.
    pub fn new(config: &ShuntConfig) -> Result<Self, ShuntError> {
        let client = OllamaClient::new(
            &config.ollama.base_url,
            Duration::from_secs(config.ollama.timeout_secs),
        )?;

        info!(base_url = config.ollama.base_url, "Ollama backend initialized");

        Ok(Self { client })
    }
}

#[async_trait]
impl InferenceBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn provider(&self) -> Provider {
        Provider::Local
    }

    async fn health_check(&self) -> Result<HealthStatus, ShuntError> {
        // The tags listing is cheap and proves the daemon is up.
        match self.client.list_models().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn complete(&self, request: BackendRequest) -> Result<BackendReply, ShuntError> {
        let chat_request = ChatRequest {
            model: request.model,
            messages: vec![ChatMessage::user(request.prompt)],
            stream: false,
            options: request
                .max_output_tokens
                .map(|n| ChatOptions { num_predict: n as i32 }),
        };

        let response = self.client.chat(&chat_request).await?;
        debug!(
            model = response.model,
            prompt_eval_count = ?response.prompt_eval_count,
            eval_count = ?response.eval_count,
            "completion received"
        );

        Ok(BackendReply {
            text: response.message.content,
            input_tokens: response.prompt_eval_count,
            output_tokens: response.eval_count,
        })
    }
}
