// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trait every inference backend implements.

use async_trait::async_trait;

use crate::error::ShuntError;
use crate::types::{BackendReply, BackendRequest, HealthStatus, Provider};

/// A backend capable of serving completion requests for one provider family.
///
/// Backends expose identity and health alongside the completion call so the
/// gateway registry and the doctor command can treat them uniformly.
#[async_trait]
pub trait InferenceBackend: Send + Sync + 'static {
    /// Returns the human-readable name of this backend instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this backend.
    fn version(&self) -> semver::Version;

    /// Returns the provider family this backend serves.
    fn provider(&self) -> Provider;

    /// Performs a health check and returns the backend's current status.
    async fn health_check(&self) -> Result<HealthStatus, ShuntError>;

    /// Sends a completion request and returns the full reply.
    ///
    /// One outbound call per invocation; backends never retry internally.
    async fn complete(&self, request: BackendRequest) -> Result<BackendReply, ShuntError>;
}
