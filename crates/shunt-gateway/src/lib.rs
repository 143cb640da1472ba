// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend registry and dispatch for the shunt hybrid router.
//!
//! The gateway owns exactly one backend per provider family and turns every
//! dispatch outcome, success or failure, into an [`InferenceResult`]. It
//! never panics, never returns `Err`, never retries, and never touches the
//! session ledger; recording completed queries is the caller's business.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use shunt_core::{
    BackendRequest, InferenceBackend, InferenceResult, ModelProfile, Provider, ShuntError,
};
use shunt_cost::{compute_cost, estimate_tokens, tokens_per_second};

/// Registry of inference backends keyed by provider family.
#[derive(Default)]
pub struct InferenceGateway {
    backends: HashMap<Provider, Arc<dyn InferenceBackend>>,
}

impl InferenceGateway {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Register a backend under its provider tag, replacing any previous one.
    pub fn register(&mut self, backend: Arc<dyn InferenceBackend>) {
        let provider = backend.provider();
        info!(provider = %provider, name = backend.name(), "backend registered");
        self.backends.insert(provider, backend);
    }

    /// Look up the backend registered for a provider, if any.
    pub fn backend(&self, provider: Provider) -> Option<&Arc<dyn InferenceBackend>> {
        self.backends.get(&provider)
    }

    /// All registered backends, in no particular order.
    pub fn backends(&self) -> impl Iterator<Item = &Arc<dyn InferenceBackend>> {
        self.backends.values()
    }

    /// Send one query to the backend selected by the profile's provider tag.
    ///
    /// Latency is wall-clock around the single outbound call. Token counts
    /// come from the backend reply when reported, otherwise from character
    /// estimates; cost always uses the profile's per-million prices. An
    /// optional caller deadline turns expiry into a `Timeout` failure.
    pub async fn dispatch(
        &self,
        query: &str,
        profile: &ModelProfile,
        timeout: Option<Duration>,
    ) -> InferenceResult {
        let started = Instant::now();

        let Some(backend) = self.backends.get(&profile.provider) else {
            let err = ShuntError::BackendUnavailable {
                message: format!(
                    "no backend registered for provider '{}'",
                    profile.provider
                ),
                source: None,
            };
            warn!(provider = %profile.provider, "dispatch refused");
            return InferenceResult::failure(&err, &profile.display_id, 0.0);
        };

        let request = BackendRequest {
            model: profile.display_id.clone(),
            prompt: query.to_string(),
            max_output_tokens: profile.max_output_tokens,
        };

        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, backend.complete(request)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ShuntError::Timeout { duration: limit }),
            },
            None => backend.complete(request).await,
        };

        let latency_seconds = started.elapsed().as_secs_f64();

        match outcome {
            Ok(reply) => {
                let input_tokens = reply
                    .input_tokens
                    .unwrap_or_else(|| estimate_tokens(query));
                let output_tokens = reply
                    .output_tokens
                    .unwrap_or_else(|| estimate_tokens(&reply.text));
                let cost_usd = compute_cost(
                    input_tokens,
                    output_tokens,
                    profile.price_per_mtok_input,
                    profile.price_per_mtok_output,
                );
                let throughput = tokens_per_second(output_tokens, latency_seconds);

                info!(
                    model = %profile.display_id,
                    latency_seconds,
                    input_tokens,
                    output_tokens,
                    cost_usd,
                    "dispatch complete"
                );

                InferenceResult {
                    success: true,
                    response_text: Some(reply.text),
                    error_message: None,
                    error_kind: None,
                    model_label: profile.display_id.clone(),
                    latency_seconds,
                    input_tokens,
                    output_tokens,
                    cost_usd,
                    tokens_per_second: throughput,
                }
            }
            Err(err) => {
                warn!(model = %profile.display_id, error = %err, "dispatch failed");
                InferenceResult::failure(&err, &profile.display_id, latency_seconds)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shunt_core::FailureKind;
    use shunt_test_utils::{MockBackend, cloud_profile, counted_reply, local_profile, text_reply};

    fn gateway_with(backend: MockBackend) -> InferenceGateway {
        let mut gateway = InferenceGateway::new();
        gateway.register(Arc::new(backend));
        gateway
    }

    #[tokio::test]
    async fn dispatch_fills_in_estimates_for_local_reply() {
        let backend = MockBackend::with_replies(
            Provider::Local,
            vec![Ok(text_reply("a twelve char reply padded out"))],
        );
        let gateway = gateway_with(backend);

        let result = gateway
            .dispatch("What is HIPAA?", &local_profile(), None)
            .await;

        assert!(result.success);
        assert_eq!(result.response_text.as_deref(), Some("a twelve char reply padded out"));
        // "What is HIPAA?" is 14 chars -> 3 estimated input tokens.
        assert_eq!(result.input_tokens, 3);
        // 30-char reply -> 7 estimated output tokens.
        assert_eq!(result.output_tokens, 7);
        // Local pricing is zero.
        assert!((result.cost_usd - 0.0).abs() < f64::EPSILON);
        assert_eq!(result.model_label, "deepseek-r1:7b");
        assert!(result.latency_seconds >= 0.0);
    }

    #[tokio::test]
    async fn dispatch_prefers_reported_token_counts() {
        let backend = MockBackend::with_replies(
            Provider::Anthropic,
            vec![Ok(counted_reply("cloud answer", 1000, 500))],
        );
        let gateway = gateway_with(backend);

        let result = gateway.dispatch("long question", &cloud_profile(), None).await;

        assert!(result.success);
        assert_eq!(result.input_tokens, 1000);
        assert_eq!(result.output_tokens, 500);
        // 1000/1M * 3.0 + 500/1M * 15.0
        let expected = 0.003 + 0.0075;
        assert!(
            (result.cost_usd - expected).abs() < 1e-10,
            "expected {expected}, got {}",
            result.cost_usd
        );
    }

    #[tokio::test]
    async fn dispatch_request_carries_profile_output_cap() {
        let backend = Arc::new(MockBackend::with_replies(
            Provider::Anthropic,
            vec![Ok(counted_reply("capped answer", 10, 5))],
        ));
        let mut gateway = InferenceGateway::new();
        gateway.register(backend.clone());

        let mut profile = cloud_profile();
        profile.max_output_tokens = Some(512);

        let result = gateway.dispatch("long question", &profile, None).await;
        assert!(result.success);

        let request = backend.last_request().expect("one call was made");
        assert_eq!(request.model, "claude-sonnet-4-20250514");
        assert_eq!(request.max_output_tokens, Some(512));
    }

    #[tokio::test]
    async fn uncapped_profile_sends_no_output_cap() {
        let backend = Arc::new(MockBackend::new(Provider::Local));
        let mut gateway = InferenceGateway::new();
        gateway.register(backend.clone());

        gateway.dispatch("hello", &local_profile(), None).await;

        let request = backend.last_request().expect("one call was made");
        assert_eq!(request.max_output_tokens, None);
    }

    #[tokio::test]
    async fn backend_error_becomes_failure_result() {
        let backend = MockBackend::with_replies(
            Provider::Local,
            vec![Err(ShuntError::BackendUnavailable {
                message: "connection refused".to_string(),
                source: None,
            })],
        );
        let gateway = gateway_with(backend);

        let result = gateway.dispatch("hello", &local_profile(), None).await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(FailureKind::BackendUnavailable));
        let message = result.error_message.as_deref().unwrap();
        assert!(message.contains("connection refused"));
        assert!(result.response_text.is_none());
        assert_eq!(result.input_tokens, 0);
        assert_eq!(result.output_tokens, 0);
        assert!((result.cost_usd - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unregistered_provider_is_backend_unavailable() {
        let gateway = InferenceGateway::new();

        let result = gateway.dispatch("hello", &cloud_profile(), None).await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(FailureKind::BackendUnavailable));
        assert!(
            result
                .error_message
                .as_deref()
                .unwrap()
                .contains("anthropic")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expiry_is_a_timeout_failure() {
        let backend = MockBackend::new(Provider::Local)
            .with_delay(Duration::from_millis(200));
        let gateway = gateway_with(backend);

        let result = gateway
            .dispatch("slow", &local_profile(), Some(Duration::from_millis(50)))
            .await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(FailureKind::Timeout));
        assert!(result.error_message.as_deref().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn failing_dispatch_makes_exactly_one_call() {
        let backend = Arc::new(MockBackend::with_replies(
            Provider::Local,
            vec![Err(ShuntError::Backend {
                message: "HTTP 500".to_string(),
                source: None,
            })],
        ));
        let mut gateway = InferenceGateway::new();
        gateway.register(backend.clone());

        let result = gateway.dispatch("hello", &local_profile(), None).await;

        assert!(!result.success);
        assert_eq!(backend.call_count(), 1, "dispatch must never retry");
    }

    #[tokio::test]
    async fn register_replaces_backend_for_same_provider() {
        let first = Arc::new(MockBackend::with_replies(
            Provider::Local,
            vec![Ok(text_reply("from first"))],
        ));
        let second = Arc::new(MockBackend::with_replies(
            Provider::Local,
            vec![Ok(text_reply("from second"))],
        ));

        let mut gateway = InferenceGateway::new();
        gateway.register(first.clone());
        gateway.register(second.clone());

        let result = gateway.dispatch("hello", &local_profile(), None).await;
        assert_eq!(result.response_text.as_deref(), Some("from second"));
        assert_eq!(first.call_count(), 0);
    }
}
