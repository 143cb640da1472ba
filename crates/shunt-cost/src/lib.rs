// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cost accounting for the shunt hybrid router.
//!
//! This crate provides:
//! - **Estimation**: rough character-based token counts and guarded throughput math
//! - **Pricing**: per-million-token cost calculation
//! - **Session ledger**: thread-safe in-memory record of completed queries with
//!   savings statistics against an all-cloud baseline

pub mod estimate;
pub mod ledger;

pub use estimate::{compute_cost, estimate_tokens, tokens_per_second};
pub use ledger::{DEFAULT_BASELINE_CLOUD_COST_USD, LedgerEntry, LedgerStats, SessionLedger};
