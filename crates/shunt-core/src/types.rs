// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across backend traits and the shunt router.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ShuntError;

/// Where a query is served: the free local model or a paid cloud model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Local,
    Cloud,
}

/// Identifies which backend family serves a model profile.
///
/// This is a closed set: the gateway selects a registered backend by this tag
/// and a profile naming an unregistered provider fails dispatch cleanly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Local,
    Anthropic,
    OpenAi,
}

impl Provider {
    /// The route class this provider belongs to.
    pub fn route(&self) -> Route {
        match self {
            Provider::Local => Route::Local,
            Provider::Anthropic | Provider::OpenAi => Route::Cloud,
        }
    }
}

/// Failure tag carried by a failed [`InferenceResult`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum FailureKind {
    BackendUnavailable,
    BackendError,
    InvalidModelKey,
    Timeout,
}

/// Health status reported by backend health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Backend is fully operational.
    Healthy,
    /// Backend is operational but experiencing issues.
    Degraded(String),
    /// Backend is not operational.
    Unhealthy(String),
}

/// A catalog entry describing one servable model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelProfile {
    /// Unique catalog handle, e.g. `deepseek-r1-7b`.
    pub key: String,
    /// Wire-level model id sent to the backend, e.g. `deepseek-r1:7b`.
    pub display_id: String,
    pub provider: Provider,
    /// USD per million input tokens.
    pub price_per_mtok_input: f64,
    /// USD per million output tokens.
    pub price_per_mtok_output: f64,
    pub description: String,
    pub best_for: Vec<String>,
    /// Per-model output cap forwarded to the backend. `None` defers to the
    /// provider-level `max_tokens` setting (local models have no cap).
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

impl ModelProfile {
    pub fn is_local(&self) -> bool {
        self.provider == Provider::Local
    }
}

/// A single completion request handed to a backend.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    /// Wire-level model id.
    pub model: String,
    pub prompt: String,
    /// Output cap for cloud backends; local backends may ignore it.
    pub max_output_tokens: Option<u32>,
}

/// A completion reply from a backend.
///
/// Cloud backends report authoritative token counts; the local backend passes
/// through whatever the engine returned, and `None` means the caller falls
/// back to character-based estimates.
#[derive(Debug, Clone)]
pub struct BackendReply {
    pub text: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

/// Uniform outcome of one dispatch, success or failure.
///
/// Exactly one of `response_text` / `error_message` is present, and
/// `error_kind` is set iff the dispatch failed.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    /// Wire-level id of the model that served (or would have served) the query.
    pub model_label: String,
    pub latency_seconds: f64,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub cost_usd: f64,
    /// Absent when elapsed time was not positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_per_second: Option<f64>,
}

impl InferenceResult {
    /// Builds the failure shape for a dispatch error: zero tokens, zero cost,
    /// the measured latency, and a tag plus message derived from the error.
    pub fn failure(error: &ShuntError, model_label: impl Into<String>, latency_seconds: f64) -> Self {
        InferenceResult {
            success: false,
            response_text: None,
            error_message: Some(error.to_string()),
            error_kind: Some(error.failure_kind()),
            model_label: model_label.into(),
            latency_seconds,
            input_tokens: 0,
            output_tokens: 0,
            cost_usd: 0.0,
            tokens_per_second: None,
        }
    }
}
