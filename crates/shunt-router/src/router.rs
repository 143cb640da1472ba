// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query routing with per-query route overrides.
//!
//! Orchestrates one query end to end: parse override > score > pick profile >
//! dispatch > record. The scorer's output is never mutated by an override;
//! the ledger entry records the route actually taken.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use shunt_core::{InferenceResult, ModelProfile, Route};
use shunt_cost::{LedgerEntry, SessionLedger};
use shunt_gateway::InferenceGateway;

use crate::scorer::{ComplexityAnalysis, ComplexityScorer};

/// Outcome of routing and executing one query.
#[derive(Debug)]
pub struct QueryOutcome {
    /// The scorer's unmodified analysis of the (override-stripped) query.
    pub analysis: ComplexityAnalysis,
    /// Route actually taken; an override may diverge from `analysis.route`.
    pub route: Route,
    /// Whether a per-query override forced the route.
    pub forced: bool,
    pub result: InferenceResult,
}

/// Routes queries between the local and cloud profiles and records successes.
pub struct QueryRouter {
    scorer: ComplexityScorer,
    gateway: Arc<InferenceGateway>,
    ledger: Arc<SessionLedger>,
    local_profile: ModelProfile,
    cloud_profile: ModelProfile,
    dispatch_timeout: Option<Duration>,
}

impl QueryRouter {
    pub fn new(
        scorer: ComplexityScorer,
        gateway: Arc<InferenceGateway>,
        ledger: Arc<SessionLedger>,
        local_profile: ModelProfile,
        cloud_profile: ModelProfile,
    ) -> Self {
        Self {
            scorer,
            gateway,
            ledger,
            local_profile,
            cloud_profile,
            dispatch_timeout: None,
        }
    }

    /// Apply a wall-clock deadline to every dispatch.
    pub fn with_dispatch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    /// Score a query without dispatching it.
    pub fn analyze(&self, query: &str) -> ComplexityAnalysis {
        self.scorer.analyze(query)
    }

    /// The profile that serves a given route.
    pub fn profile_for(&self, route: Route) -> &ModelProfile {
        match route {
            Route::Local => &self.local_profile,
            Route::Cloud => &self.cloud_profile,
        }
    }

    /// Route, dispatch, and (on success only) record one query.
    ///
    /// `forced_route` pins the route regardless of the score; otherwise the
    /// input may carry a `/local ` or `/cloud ` prefix doing the same. Failed
    /// dispatches leave the ledger untouched.
    pub async fn execute(&self, input: &str, forced_route: Option<Route>) -> QueryOutcome {
        let (prefix_route, query) = parse_route_override(input);
        let forced = forced_route.or(prefix_route);

        let analysis = self.scorer.analyze(query);
        let route = forced.unwrap_or(analysis.route);
        let profile = self.profile_for(route);

        info!(
            recommended = %analysis.route,
            selected = %route,
            forced = forced.is_some(),
            score = analysis.score,
            model = %profile.display_id,
            "routing decision"
        );

        let result = self
            .gateway
            .dispatch(query, profile, self.dispatch_timeout)
            .await;

        if result.success {
            self.ledger.append(LedgerEntry::new(
                query,
                route,
                &result.model_label,
                result.latency_seconds,
                result.cost_usd,
                analysis.score,
            ));
        }

        QueryOutcome {
            analysis,
            route,
            forced: forced.is_some(),
            result,
        }
    }
}

/// Parse a per-query route override prefix from user input.
///
/// Supports `/local ` and `/cloud ` prefixes (with trailing space). Returns
/// `(Some(route), rest_of_query)` if an override is found, or
/// `(None, original_input)` if not. The prefix is stripped from the returned
/// query text.
pub fn parse_route_override(input: &str) -> (Option<Route>, &str) {
    let trimmed = input.trim_start();
    if let Some(rest) = trimmed.strip_prefix("/local ") {
        (Some(Route::Local), rest)
    } else if let Some(rest) = trimmed.strip_prefix("/cloud ") {
        (Some(Route::Cloud), rest)
    } else {
        (None, input)
    }
}
