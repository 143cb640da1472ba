// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the shunt hybrid router.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

use shunt_core::{ModelProfile, Provider};

/// Top-level shunt configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShuntConfig {
    /// Process-level runtime settings.
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Complexity scoring and route selection settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Cost accounting settings.
    #[serde(default)]
    pub cost: CostConfig,

    /// Local Ollama daemon settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Model catalog. Routing profiles must reference keys from this list.
    #[serde(default = "default_models")]
    pub models: Vec<ModelProfile>,
}

impl Default for ShuntConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            routing: RoutingConfig::default(),
            cost: CostConfig::default(),
            ollama: OllamaConfig::default(),
            anthropic: AnthropicConfig::default(),
            openai: OpenAiConfig::default(),
            models: default_models(),
        }
    }
}

impl ShuntConfig {
    /// Looks up a model profile by catalog key.
    pub fn model(&self, key: &str) -> Option<&ModelProfile> {
        self.models.iter().find(|m| m.key == key)
    }
}

/// Process-level runtime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Wall-clock ceiling for a single dispatch in seconds. `None` disables it.
    #[serde(default)]
    pub dispatch_timeout_secs: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dispatch_timeout_secs: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Complexity scoring and route selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Complexity score at or above which a query routes to the cloud.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Catalog key of the model used for local dispatch.
    #[serde(default = "default_local_profile")]
    pub local_profile: String,

    /// Catalog key of the model used for cloud dispatch.
    #[serde(default = "default_cloud_profile")]
    pub cloud_profile: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            local_profile: default_local_profile(),
            cloud_profile: default_cloud_profile(),
        }
    }
}

fn default_threshold() -> f64 {
    0.6
}

fn default_local_profile() -> String {
    "deepseek-r1-7b".to_string()
}

fn default_cloud_profile() -> String {
    "claude-sonnet-4".to_string()
}

/// Cost accounting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostConfig {
    /// Assumed per-query cloud cost in USD used for the savings baseline.
    #[serde(default = "default_baseline_cloud_cost")]
    pub baseline_cloud_cost_usd: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            baseline_cloud_cost_usd: default_baseline_cloud_cost(),
        }
    }
}

fn default_baseline_cloud_cost() -> f64 {
    0.005
}

/// Local Ollama daemon configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_backend_timeout() -> u64 {
    300
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_backend_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_backend_timeout(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// The built-in model catalog.
///
/// Config files may replace this wholesale with their own `[[models]]` tables;
/// routing profiles are validated against whichever catalog is active.
pub fn default_models() -> Vec<ModelProfile> {
    vec![
        ModelProfile {
            key: "deepseek-r1-7b".to_string(),
            display_id: "deepseek-r1:7b".to_string(),
            provider: Provider::Local,
            price_per_mtok_input: 0.0,
            price_per_mtok_output: 0.0,
            description: "DeepSeek R1 7B served by a local Ollama daemon. Free to run."
                .to_string(),
            best_for: vec![
                "simple factual questions".to_string(),
                "short summaries".to_string(),
                "quick drafts".to_string(),
            ],
            max_output_tokens: None,
        },
        ModelProfile {
            key: "claude-sonnet-4".to_string(),
            display_id: "claude-sonnet-4-20250514".to_string(),
            provider: Provider::Anthropic,
            price_per_mtok_input: 3.0,
            price_per_mtok_output: 15.0,
            description: "Anthropic Claude Sonnet 4 via the Messages API.".to_string(),
            best_for: vec![
                "multi-part analysis".to_string(),
                "long-form reasoning".to_string(),
                "compliance and risk review".to_string(),
            ],
            max_output_tokens: None,
        },
        ModelProfile {
            key: "gpt-4o".to_string(),
            display_id: "gpt-4o".to_string(),
            provider: Provider::OpenAi,
            price_per_mtok_input: 2.5,
            price_per_mtok_output: 10.0,
            description: "OpenAI GPT-4o via the Chat Completions API.".to_string(),
            best_for: vec![
                "broad general knowledge".to_string(),
                "structured output".to_string(),
                "creative drafting".to_string(),
            ],
            max_output_tokens: None,
        },
    ]
}
