// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shunt.toml` > `~/.config/shunt/shunt.toml` > `/etc/shunt/shunt.toml`
//! with environment variable overrides via `SHUNT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ShuntConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shunt/shunt.toml` (system-wide)
/// 3. `~/.config/shunt/shunt.toml` (user XDG config)
/// 4. `./shunt.toml` (local directory)
/// 5. `SHUNT_*` environment variables
pub fn load_config() -> Result<ShuntConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShuntConfig::default()))
        .merge(Toml::file("/etc/shunt/shunt.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("shunt/shunt.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("shunt.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit config file specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ShuntConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShuntConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShuntConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShuntConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// CRITICAL: Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `SHUNT_OLLAMA_BASE_URL` must
/// map to `ollama.base_url`, not `ollama.base.url`.
fn env_provider() -> Env {
    Env::prefixed("SHUNT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SHUNT_ANTHROPIC_API_KEY -> "anthropic_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("runtime_", "runtime.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("cost_", "cost.", 1)
            .replacen("ollama_", "ollama.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("openai_", "openai.", 1);
        mapped.into()
    })
}
