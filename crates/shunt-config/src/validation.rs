// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as threshold bounds, catalog key uniqueness, and profile references.

use std::collections::HashSet;

use shunt_core::Route;

use crate::diagnostic::ConfigError;
use crate::model::ShuntConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShuntConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate threshold bounds
    if !(0.0..=1.0).contains(&config.routing.threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.threshold must be between 0.0 and 1.0, got {}",
                config.routing.threshold
            ),
        });
    }

    // Validate baseline cost is non-negative
    if config.cost.baseline_cloud_cost_usd < 0.0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "cost.baseline_cloud_cost_usd must be non-negative, got {}",
                config.cost.baseline_cloud_cost_usd
            ),
        });
    }

    // Validate base URLs are not empty
    if config.ollama.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.base_url must not be empty".to_string(),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    // Validate model keys are non-empty and unique
    let mut seen_keys = HashSet::new();
    for (i, model) in config.models.iter().enumerate() {
        if model.key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("models[{i}].key must not be empty"),
            });
        } else if !seen_keys.insert(&model.key) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate model key `{}` in [[models]] array", model.key),
            });
        }
    }

    // Validate model prices
    for model in &config.models {
        if model.price_per_mtok_input < 0.0 || model.price_per_mtok_output < 0.0 {
            errors.push(ConfigError::Validation {
                message: format!("model `{}` has a negative price per million tokens", model.key),
            });
        }
        if model.is_local()
            && (model.price_per_mtok_input != 0.0 || model.price_per_mtok_output != 0.0)
        {
            errors.push(ConfigError::Validation {
                message: format!(
                    "local model `{}` must have zero price per million tokens",
                    model.key
                ),
            });
        }
    }

    // Validate routing profiles reference catalog keys of the right route class
    check_profile(config, &config.routing.local_profile, "routing.local_profile", Route::Local, &mut errors);
    check_profile(config, &config.routing.cloud_profile, "routing.cloud_profile", Route::Cloud, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_profile(
    config: &ShuntConfig,
    key: &str,
    field: &str,
    expected: Route,
    errors: &mut Vec<ConfigError>,
) {
    match config.model(key) {
        None => errors.push(ConfigError::Validation {
            message: format!("{field} `{key}` does not match any key in the [[models]] catalog"),
        }),
        Some(profile) if profile.provider.route() != expected => {
            errors.push(ConfigError::Validation {
                message: format!(
                    "{field} `{key}` resolves to a {} model, expected {}",
                    profile.provider.route(),
                    expected
                ),
            });
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ShuntConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn threshold_out_of_range_fails_validation() {
        let mut config = ShuntConfig::default();
        config.routing.threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("routing.threshold"))));
    }

    #[test]
    fn negative_baseline_fails_validation() {
        let mut config = ShuntConfig::default();
        config.cost.baseline_cloud_cost_usd = -0.001;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("baseline_cloud_cost_usd"))));
    }

    #[test]
    fn duplicate_model_keys_fail_validation() {
        let mut config = ShuntConfig::default();
        let mut dup = config.models[0].clone();
        dup.display_id = "another:tag".to_string();
        config.models.push(dup);
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate model key"))));
    }

    #[test]
    fn unknown_local_profile_fails_validation() {
        let mut config = ShuntConfig::default();
        config.routing.local_profile = "no-such-model".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("no-such-model"))));
    }

    #[test]
    fn cloud_profile_pointing_at_local_model_fails_validation() {
        let mut config = ShuntConfig::default();
        config.routing.cloud_profile = "deepseek-r1-7b".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("routing.cloud_profile"))));
    }

    #[test]
    fn priced_local_model_fails_validation() {
        let mut config = ShuntConfig::default();
        config.models[0].price_per_mtok_output = 0.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("zero price"))));
    }

    #[test]
    fn collects_all_errors_instead_of_failing_fast() {
        let mut config = ShuntConfig::default();
        config.routing.threshold = -0.2;
        config.cost.baseline_cloud_cost_usd = -1.0;
        config.routing.local_profile = "missing".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let config: ShuntConfig = toml::from_str("").expect("empty TOML should deserialize");
        assert_eq!(config.routing.threshold, 0.6);
        assert_eq!(config.models.len(), 3);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn partial_section_keeps_field_defaults() {
        let toml_str = r#"
[ollama]
base_url = "http://10.0.0.5:11434"
"#;
        let config: ShuntConfig =
            toml::from_str(toml_str).expect("partial section should deserialize");
        assert_eq!(config.ollama.base_url, "http://10.0.0.5:11434");
        assert_eq!(config.ollama.timeout_secs, 300);
    }

    #[test]
    fn sections_deny_unknown_fields() {
        let toml_str = r#"
[routing]
treshold = 0.6
"#;
        let err = toml::from_str::<ShuntConfig>(toml_str).unwrap_err();
        assert!(
            err.to_string().contains("unknown field"),
            "expected unknown field error, got: {err}"
        );
    }
}
