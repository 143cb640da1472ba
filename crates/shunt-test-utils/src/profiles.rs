// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model profile fixtures matching the default catalog.

use shunt_core::{ModelProfile, Provider};

/// The free local profile used across tests.
pub fn local_profile() -> ModelProfile {
    ModelProfile {
        key: "deepseek-r1-7b".to_string(),
        display_id: "deepseek-r1:7b".to_string(),
        provider: Provider::Local,
        price_per_mtok_input: 0.0,
        price_per_mtok_output: 0.0,
        description: "DeepSeek R1 7B served by a local engine".to_string(),
        best_for: vec!["Simple questions".to_string(), "Quick drafts".to_string()],
        max_output_tokens: None,
    }
}

/// A paid cloud profile (Sonnet pricing) used across tests.
pub fn cloud_profile() -> ModelProfile {
    ModelProfile {
        key: "claude-sonnet-4".to_string(),
        display_id: "claude-sonnet-4-20250514".to_string(),
        provider: Provider::Anthropic,
        price_per_mtok_input: 3.0,
        price_per_mtok_output: 15.0,
        description: "Claude Sonnet 4 via the Anthropic API".to_string(),
        best_for: vec!["Deep analysis".to_string(), "Long-form writing".to_string()],
        max_output_tokens: Some(2000),
    }
}
