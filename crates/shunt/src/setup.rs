// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires the configured backends, gateway, ledger, and router together.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use shunt_anthropic::AnthropicBackend;
use shunt_config::ShuntConfig;
use shunt_core::{ModelProfile, Provider, ShuntError};
use shunt_cost::SessionLedger;
use shunt_gateway::InferenceGateway;
use shunt_ollama::OllamaBackend;
use shunt_openai::OpenAiBackend;
use shunt_router::{ComplexityScorer, QueryRouter};

/// Everything a command needs to route and record queries.
pub struct App {
    pub router: QueryRouter,
    pub ledger: Arc<SessionLedger>,
    pub local_profile: ModelProfile,
    pub cloud_profile: ModelProfile,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").finish_non_exhaustive()
    }
}

/// Builds the routing pipeline from configuration.
///
/// The local backend is mandatory; cloud backends without a resolvable API
/// key are skipped with a warning, and a query forced to such a route fails
/// at dispatch instead of being silently downgraded.
pub fn build(config: &ShuntConfig) -> Result<App, ShuntError> {
    let mut gateway = InferenceGateway::new();
    gateway.register(Arc::new(OllamaBackend::new(config)?));

    match AnthropicBackend::new(config) {
        Ok(backend) => gateway.register(Arc::new(backend)),
        Err(e) => warn!(error = %e, "Anthropic backend not registered"),
    }
    match OpenAiBackend::new(config) {
        Ok(backend) => gateway.register(Arc::new(backend)),
        Err(e) => warn!(error = %e, "OpenAI backend not registered"),
    }

    let local_profile = resolve_profile(config, &config.routing.local_profile)?;
    let cloud_profile = resolve_profile(config, &config.routing.cloud_profile)?;

    let ledger = Arc::new(SessionLedger::with_baseline(
        config.cost.baseline_cloud_cost_usd,
    ));

    let router = QueryRouter::new(
        ComplexityScorer::with_threshold(config.routing.threshold),
        Arc::new(gateway),
        ledger.clone(),
        local_profile.clone(),
        cloud_profile.clone(),
    )
    .with_dispatch_timeout(
        config
            .runtime
            .dispatch_timeout_secs
            .map(Duration::from_secs),
    );

    Ok(App {
        router,
        ledger,
        local_profile,
        cloud_profile,
    })
}

/// Resolve a routing profile from the catalog, filling in the output cap.
///
/// Catalog entries without an explicit `max_output_tokens` inherit the
/// provider section's `max_tokens`; local models stay uncapped.
fn resolve_profile(config: &ShuntConfig, key: &str) -> Result<ModelProfile, ShuntError> {
    let mut profile = config
        .model(key)
        .cloned()
        .ok_or_else(|| ShuntError::InvalidModelKey { key: key.to_string() })?;

    if profile.max_output_tokens.is_none() {
        profile.max_output_tokens = match profile.provider {
            Provider::Local => None,
            Provider::Anthropic => Some(config.anthropic.max_tokens),
            Provider::OpenAi => Some(config.openai.max_tokens),
        };
    }

    Ok(profile)
}
