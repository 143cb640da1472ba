// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the shunt hybrid router.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the shunt workspace. All inference backends
//! implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShuntError;
pub use traits::InferenceBackend;
pub use types::{
    BackendReply, BackendRequest, FailureKind, HealthStatus, InferenceResult, ModelProfile,
    Provider, Route,
};
