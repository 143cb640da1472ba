// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock inference backend for deterministic testing.
//!
//! `MockBackend` implements `InferenceBackend` with pre-configured replies,
//! enabling fast, CI-runnable tests without a running engine or API keys.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shunt_core::{
    BackendReply, BackendRequest, HealthStatus, InferenceBackend, Provider, ShuntError,
};

/// A mock backend that returns pre-configured replies.
///
/// Replies (successes or injected failures) are popped from a FIFO queue.
/// When the queue is empty, a default "mock response" reply with no token
/// counts is returned. Every `complete` call is counted and its request
/// recorded, so tests can assert that a dispatch makes exactly one outbound
/// call and carried the expected model id and output cap.
pub struct MockBackend {
    provider: Provider,
    replies: Arc<Mutex<VecDeque<Result<BackendReply, ShuntError>>>>,
    requests: Arc<StdMutex<Vec<BackendRequest>>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockBackend {
    /// Create a new mock backend with an empty reply queue.
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(StdMutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Create a mock backend pre-loaded with the given outcomes.
    pub fn with_replies(
        provider: Provider,
        replies: Vec<Result<BackendReply, ShuntError>>,
    ) -> Self {
        Self {
            provider,
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(StdMutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Sleep this long inside every `complete` call, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add an outcome to the end of the queue.
    pub async fn push_reply(&self, reply: Result<BackendReply, ShuntError>) {
        self.replies.lock().await.push_back(reply);
    }

    /// Number of `complete` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<BackendRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any call has been made.
    pub fn last_request(&self) -> Option<BackendRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Pop the next outcome, or return the default reply.
    async fn next_reply(&self) -> Result<BackendReply, ShuntError> {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(text_reply("mock response")))
    }
}

/// A reply with no engine-reported token counts, as the local engine may return.
pub fn text_reply(text: &str) -> BackendReply {
    BackendReply {
        text: text.to_string(),
        input_tokens: None,
        output_tokens: None,
    }
}

/// A reply with authoritative token counts, as cloud APIs return.
pub fn counted_reply(text: &str, input_tokens: u32, output_tokens: u32) -> BackendReply {
    BackendReply {
        text: text.to_string(),
        input_tokens: Some(input_tokens),
        output_tokens: Some(output_tokens),
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn provider(&self) -> Provider {
        self.provider
    }

    async fn health_check(&self) -> Result<HealthStatus, ShuntError> {
        Ok(HealthStatus::Healthy)
    }

    async fn complete(&self, request: BackendRequest) -> Result<BackendReply, ShuntError> {
        self.requests.lock().unwrap().push(request);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply().await
    }
}
