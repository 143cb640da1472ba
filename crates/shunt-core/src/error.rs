// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the shunt hybrid router.

use thiserror::Error;

use crate::types::FailureKind;

/// The primary error type used across all shunt backend traits and core operations.
#[derive(Debug, Error)]
pub enum ShuntError {
    /// Configuration errors (invalid TOML, missing API key, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend exists but cannot be reached (daemon down, connection refused,
    /// no backend registered for the requested provider).
    #[error("backend unavailable: {message}")]
    BackendUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend was reached but the call failed (HTTP error status, API-reported
    /// error, malformed response body).
    #[error("backend error: {message}")]
    Backend {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested model key is not in the catalog, or the engine does not know
    /// the model.
    #[error("unknown model key: {key}")]
    InvalidModelKey { key: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ShuntError {
    /// Maps this error onto the closed set of failure tags carried by an
    /// [`InferenceResult`](crate::types::InferenceResult). Every variant maps to
    /// exactly one tag.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ShuntError::Config(_) | ShuntError::BackendUnavailable { .. } => {
                FailureKind::BackendUnavailable
            }
            ShuntError::Backend { .. } | ShuntError::Internal(_) => FailureKind::BackendError,
            ShuntError::InvalidModelKey { .. } => FailureKind::InvalidModelKey,
            ShuntError::Timeout { .. } => FailureKind::Timeout,
        }
    }
}
