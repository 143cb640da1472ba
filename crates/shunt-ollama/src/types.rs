// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Ollama HTTP API.
//!
//! Covers the non-streaming subset of `/api/chat` plus the `/api/tags`
//! model listing used for health checks.

use serde::{Deserialize, Serialize};

/// A chat completion request for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model tag, e.g. "deepseek-r1:7b".
    pub model: String,

    /// Conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Always false here; streaming is not used.
    pub stream: bool,

    /// Generation options. Omitted entirely when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Generation options for a chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    /// Output token cap. Ollama's equivalent of max_tokens.
    pub num_predict: i32,
}

/// A non-streaming chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: ChatMessage,
    pub done: bool,

    /// Prompt token count as measured by the engine. Absent when the
    /// prompt was served from cache.
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,

    /// Generated token count as measured by the engine.
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Response from `GET /api/tags`: models installed on the daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<InstalledModel>,
}

/// One installed model from the tags listing.
#[derive(Debug, Clone, Deserialize)]
pub struct InstalledModel {
    /// Full model tag, e.g. "deepseek-r1:7b".
    pub name: String,

    /// Size on disk in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Error envelope returned by the daemon on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "deepseek-r1:7b".to_string(),
            messages: vec![ChatMessage::user("What is HIPAA?")],
            stream: false,
            options: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-r1:7b");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "What is HIPAA?");
        assert_eq!(json["stream"], false);
        assert!(json.get("options").is_none(), "absent options must be omitted");
    }

    #[test]
    fn chat_request_includes_num_predict_when_capped() {
        let request = ChatRequest {
            model: "deepseek-r1:7b".to_string(),
            messages: vec![ChatMessage::user("hi")],
            stream: false,
            options: Some(ChatOptions { num_predict: 256 }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["options"]["num_predict"], 256);
    }

    #[test]
    fn chat_response_parses_token_counts() {
        let body = r#"{
            "model": "deepseek-r1:7b",
            "created_at": "2026-01-05T10:00:00Z",
            "message": {"role": "assistant", "content": "HIPAA is a US law."},
            "done": true,
            "total_duration": 1500000000,
            "prompt_eval_count": 9,
            "eval_count": 31
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.content, "HIPAA is a US law.");
        assert!(response.done);
        assert_eq!(response.prompt_eval_count, Some(9));
        assert_eq!(response.eval_count, Some(31));
    }

    #[test]
    fn chat_response_tolerates_missing_counts() {
        let body = r#"{
            "model": "deepseek-r1:7b",
            "message": {"role": "assistant", "content": "cached"},
            "done": true
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.prompt_eval_count, None);
        assert_eq!(response.eval_count, None);
    }

    #[test]
    fn tags_response_parses_model_names() {
        let body = r#"{
            "models": [
                {"name": "deepseek-r1:7b", "modified_at": "2026-01-01T00:00:00Z", "size": 4683075271},
                {"name": "llama3.2:3b", "size": 2019393189}
            ]
        }"#;

        let response: TagsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.models.len(), 2);
        assert_eq!(response.models[0].name, "deepseek-r1:7b");
        assert_eq!(response.models[1].size, 2019393189);
    }
}
