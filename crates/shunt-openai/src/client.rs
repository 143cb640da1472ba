// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Chat Completions API.
//!
//! Provides [`OpenAiClient`] which handles bearer authentication and
//! error-body parsing. Exactly one outbound request per call; failed calls
//! are never retried here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use shunt_core::ShuntError;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key for bearer authentication
    /// * `base_url` - API root, e.g. "https://api.openai.com/v1"
    /// * `timeout` - Socket-level timeout for the underlying HTTP client
    pub fn new(
        api_key: &str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ShuntError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ShuntError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
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

    /// Sends a non-streaming request and returns the full response.
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ShuntError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ShuntError::BackendUnavailable {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| ShuntError::Backend {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            let chat_response: ChatCompletionResponse =
                serde_json::from_str(&body).map_err(|e| ShuntError::Backend {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(chat_response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            match api_err.error.type_ {
                Some(kind) => format!("OpenAI API error ({kind}): {}", api_err.error.message),
                None => format!("OpenAI API error: {}", api_err.error.message),
            }
        } else {
            format!("API returned {status}: {body}")
        };
        Err(ShuntError::Backend {
            message,
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatCompletionMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("test-api-key", base_url, Duration::from_secs(30)).unwrap()
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-4o".into(),
            messages: vec![ChatCompletionMessage::user("Hello")],
            max_tokens: 2000,
        }
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "gpt-4o",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hi there!"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn complete_chat_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await.unwrap();

        assert_eq!(result.text(), "Hi there!");
        assert_eq!(result.usage.prompt_tokens, 10);
        assert_eq!(result.usage.completion_tokens, 5);
    }

    #[tokio::test]
    async fn client_sends_bearer_authorization() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn complete_chat_fails_on_401() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        });

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete_chat(&test_request()).await.unwrap_err();
        assert!(matches!(err, ShuntError::Backend { .. }));
        assert!(err.to_string().contains("Incorrect API key"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_chat_does_not_retry_on_rate_limit() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"message": "Rate limit reached", "type": "rate_limit_error"}
        });

        // A single request, even for a retryable-looking status.
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete_chat(&test_request()).await;
        assert!(result.is_err());

        server.verify().await;
    }

    #[tokio::test]
    async fn complete_chat_rejects_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.complete_chat(&test_request()).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse"), "got: {err}");
    }
}
