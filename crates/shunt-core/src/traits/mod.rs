// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait definitions for the shunt router.
//!
//! Every inference backend implements [`InferenceBackend`] and uses
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod backend;

pub use backend::InferenceBackend;
