// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query complexity scoring and local/cloud routing for shunt.
//!
//! This crate provides:
//! - [`ComplexityScorer`]: heuristic complexity scoring (zero-cost, zero-latency)
//! - [`QueryRouter`]: the per-query pipeline of score, route, dispatch, record
//!
//! The scorer runs before any LLM call and recommends the free local model or
//! a paid cloud model against a fixed threshold. Routing is advisory: per-query
//! overrides can force either route, and overrides are visible in the session
//! ledger while the scorer's output stays untouched.

pub mod router;
pub mod scorer;

pub use router::{QueryOutcome, QueryRouter, parse_route_override};
pub use scorer::{ComplexityAnalysis, ComplexityScorer, DEFAULT_THRESHOLD};
