// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for shunt integration tests.
//!
//! Provides mock backends and shared fixtures for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockBackend`] - Mock inference backend with pre-configured replies and
//!   failure injection
//! - [`local_profile`] / [`cloud_profile`] - Model profile fixtures

pub mod mock_backend;
pub mod profiles;

pub use mock_backend::{MockBackend, counted_reply, text_reply};
pub use profiles::{cloud_profile, local_profile};
