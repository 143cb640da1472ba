// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama daemon.
//!
//! Provides [`OllamaClient`] for non-streaming chat completions and the
//! installed-model listing. Exactly one outbound request per call; failed
//! calls are never retried here.

use std::time::Duration;

use tracing::debug;

use shunt_core::ShuntError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse, InstalledModel, TagsResponse};

/// HTTP client for Ollama daemon communication.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a new Ollama client.
    ///
    /// # Arguments
    /// * `base_url` - Daemon address, e.g. "http://localhost:11434"
    /// * `timeout` - Socket-level timeout for the underlying HTTP client.
    ///   Local generation on modest hardware can take minutes; size accordingly.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ShuntError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShuntError::Backend {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Sends a non-streaming chat request and returns the full response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ShuntError> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ShuntError::BackendUnavailable {
                message: format!(
                    "cannot reach Ollama daemon at {}: {e}",
                    self.base_url
                ),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = request.model, "chat response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| ShuntError::Backend {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            let chat_response: ChatResponse =
                serde_json::from_str(&body).map_err(|e| ShuntError::Backend {
                    message: format!("failed to parse chat response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(chat_response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!("Ollama API error: {}", api_err.error)
        } else {
            format!("API returned {status}: {body}")
        };
        Err(ShuntError::Backend {
            message,
            source: None,
        })
    }

    /// Lists the models installed on the daemon.
    pub async fn list_models(&self) -> Result<Vec<InstalledModel>, ShuntError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ShuntError::BackendUnavailable {
                message: format!(
                    "cannot reach Ollama daemon at {}: {e}",
                    self.base_url
                ),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShuntError::Backend {
                message: format!("API returned {status}: {body}"),
                source: None,
            });
        }

        let tags: TagsResponse = response.json().await.map_err(|e| ShuntError::Backend {
            message: format!("failed to parse tags response: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(tags.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OllamaClient {
        OllamaClient::new(base_url, Duration::from_secs(30)).unwrap()
    }

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "deepseek-r1:7b".to_string(),
            messages: vec![ChatMessage::user("What is HIPAA?")],
            stream: false,
            options: None,
        }
    }

    #[tokio::test]
    async fn chat_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "model": "deepseek-r1:7b",
            "message": {"role": "assistant", "content": "HIPAA is a US healthcare privacy law."},
            "done": true,
            "prompt_eval_count": 9,
            "eval_count": 31
        });

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat(&test_request()).await.unwrap();

        assert_eq!(result.message.content, "HIPAA is a US healthcare privacy law.");
        assert_eq!(result.prompt_eval_count, Some(9));
        assert_eq!(result.eval_count, Some(31));
    }

    #[tokio::test]
    async fn chat_sends_exact_body_without_options() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "model": "deepseek-r1:7b",
            "messages": [{"role": "user", "content": "What is HIPAA?"}],
            "stream": false
        });

        let response_body = serde_json::json!({
            "model": "deepseek-r1:7b",
            "message": {"role": "assistant", "content": "ok"},
            "done": true
        });

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat(&test_request()).await;
        assert!(result.is_ok(), "body should match exactly: {result:?}");
    }

    #[tokio::test]
    async fn chat_surfaces_missing_model_error() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": "model 'missing:7b' not found, try pulling it first"
        });

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.chat(&test_request()).await.unwrap_err();
        assert!(matches!(err, ShuntError::Backend { .. }));
        assert!(err.to_string().contains("try pulling it first"), "got: {err}");
    }

    #[tokio::test]
    async fn chat_does_not_retry_on_server_error() {
        let server = MockServer::start().await;

        // A single request, even for a retryable-looking status.
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.chat(&test_request()).await;
        assert!(result.is_err());

        server.verify().await;
    }

    #[tokio::test]
    async fn unreachable_daemon_maps_to_backend_unavailable() {
        // Nothing listens on the discard port.
        let client = test_client("http://127.0.0.1:1");
        let err = client.chat(&test_request()).await.unwrap_err();
        assert!(matches!(err, ShuntError::BackendUnavailable { .. }));
        assert!(err.to_string().contains("Ollama daemon"), "got: {err}");
    }

    #[tokio::test]
    async fn list_models_returns_installed_tags() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "models": [
                {"name": "deepseek-r1:7b", "size": 4683075271u64},
                {"name": "llama3.2:3b", "size": 2019393189u64}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let models = client.list_models().await.unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "deepseek-r1:7b");
    }
}
