// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session ledger of completed queries.
//!
//! Each successful dispatch is recorded with its route, cost, and complexity
//! score. The ledger lives for the process only; `stats` compares actual
//! spend against an all-cloud baseline to report estimated savings.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use shunt_core::Route;

/// Default assumed cost per query if every query had gone to a cloud model.
pub const DEFAULT_BASELINE_CLOUD_COST_USD: f64 = 0.005;

/// A single completed query as recorded in the session ledger.
///
/// `route` is the route actually taken, which under a forced override may
/// differ from what the scorer recommended; `complexity_score` is always the
/// scorer's unmodified output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub query: String,
    pub route: Route,
    /// Wire-level model id that served the query.
    pub model_label: String,
    pub latency_seconds: f64,
    pub cost_usd: f64,
    pub timestamp_utc: DateTime<Utc>,
    pub complexity_score: f64,
}

impl LedgerEntry {
    /// Create a new entry stamped with the current UTC time.
    pub fn new(
        query: impl Into<String>,
        route: Route,
        model_label: impl Into<String>,
        latency_seconds: f64,
        cost_usd: f64,
        complexity_score: f64,
    ) -> Self {
        Self {
            query: query.into(),
            route,
            model_label: model_label.into(),
            latency_seconds,
            cost_usd,
            timestamp_utc: Utc::now(),
            complexity_score,
        }
    }
}

/// Aggregate statistics over the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerStats {
    pub total_count: usize,
    pub local_count: usize,
    pub cloud_count: usize,
    pub total_cost_usd: f64,
    /// Baseline (all queries at the cloud rate) minus actual spend.
    pub estimated_savings_usd: f64,
    /// Savings as a percentage of the baseline; 0 when the ledger is empty.
    pub estimated_savings_pct: f64,
}

/// Thread-safe in-memory ledger of the session's completed queries.
///
/// Failed dispatches are never appended; the invoking layer only records
/// successes. All operations take `&self` so the ledger can be shared freely.
pub struct SessionLedger {
    entries: Mutex<Vec<LedgerEntry>>,
    baseline_cloud_cost_usd: f64,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::with_baseline(DEFAULT_BASELINE_CLOUD_COST_USD)
    }

    /// Create a ledger with a custom all-cloud baseline cost per query.
    pub fn with_baseline(baseline_cloud_cost_usd: f64) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            baseline_cloud_cost_usd,
        }
    }

    // A poisoned lock only means another thread panicked mid-append; the
    // Vec is still structurally sound, so recover rather than propagate.
    fn lock(&self) -> MutexGuard<'_, Vec<LedgerEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a completed query record.
    pub fn append(&self, entry: LedgerEntry) {
        info!(
            route = %entry.route,
            model = %entry.model_label,
            cost_usd = entry.cost_usd,
            complexity_score = entry.complexity_score,
            "query recorded"
        );
        self.lock().push(entry);
    }

    /// All entries in insertion order, most recent last.
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        self.lock().clone()
    }

    /// Remove every entry in one step.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Aggregate counts, spend, and estimated savings vs. the all-cloud
    /// baseline. An empty ledger reports zeros throughout.
    pub fn stats(&self) -> LedgerStats {
        let entries = self.lock();
        let total_count = entries.len();
        let local_count = entries.iter().filter(|e| e.route == Route::Local).count();
        let cloud_count = total_count - local_count;
        let total_cost_usd: f64 = entries.iter().map(|e| e.cost_usd).sum();
        drop(entries);

        let baseline_total = total_count as f64 * self.baseline_cloud_cost_usd;
        let estimated_savings_usd = baseline_total - total_cost_usd;
        let estimated_savings_pct = if baseline_total > 0.0 {
            estimated_savings_usd / baseline_total * 100.0
        } else {
            0.0
        };

        LedgerStats {
            total_count,
            local_count,
            cloud_count,
            total_cost_usd,
            estimated_savings_usd,
            estimated_savings_pct,
        }
    }
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}
