// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shunt doctor` command implementation.
//!
//! Runs diagnostic checks against the shunt environment: configuration,
//! local daemon reachability, model availability, and cloud API keys.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use shunt_config::ShuntConfig;
use shunt_core::ShuntError;
use shunt_ollama::client::OllamaClient;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

/// Run the `shunt doctor` command.
///
/// With `--plain`, disables colored output. Exits non-zero when any check
/// fails; a missing cloud key is a warning because local routing still works.
pub async fn run_doctor(config: &ShuntConfig, plain: bool) -> Result<(), ShuntError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let mut results = Vec::new();

    results.push(check_config());

    let daemon = check_ollama_daemon(config).await;
    let daemon_up = daemon.status == CheckStatus::Pass;
    results.push(daemon);
    if daemon_up {
        results.push(check_local_model(config).await);
    }

    results.push(check_api_key(
        "Anthropic key",
        config.anthropic.api_key.as_deref(),
        "ANTHROPIC_API_KEY",
    ));
    results.push(check_api_key(
        "OpenAI key",
        config.openai.api_key.as_deref(),
        "OPENAI_API_KEY",
    ));

    println!();
    println!("  shunt doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;

    for result in &results {
        let duration_ms = result.duration.as_millis();
        let line;

        match result.status {
            CheckStatus::Pass => {
                if use_color {
                    use colored::Colorize;
                    let symbol = "✓".green().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                } else {
                    line = format!(
                        "    [OK]   {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Warn => {
                warn_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "!".yellow().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.yellow()
                    );
                } else {
                    line = format!(
                        "    [WARN] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
            CheckStatus::Fail => {
                fail_count += 1;
                if use_color {
                    use colored::Colorize;
                    let symbol = "✗".red().to_string();
                    line = format!(
                        "    {symbol} {:<20} {} ({duration_ms}ms)",
                        result.name,
                        result.message.red()
                    );
                } else {
                    line = format!(
                        "    [FAIL] {:<20} {} ({duration_ms}ms)",
                        result.name, result.message
                    );
                }
            }
        }

        println!("{line}");
    }

    println!();

    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    if fail_count > 0 {
        let check_word = if fail_count == 1 { "check" } else { "checks" };
        return Err(ShuntError::Internal(format!("{fail_count} {check_word} failed")));
    }
    Ok(())
}

/// Check configuration loads and validates without errors.
fn check_config() -> CheckResult {
    let start = Instant::now();
    match shunt_config::load_and_validate() {
        Ok(_) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Pass,
            message: "valid".to_string(),
            duration: start.elapsed(),
        },
        Err(errors) => CheckResult {
            name: "Configuration".to_string(),
            status: CheckStatus::Fail,
            message: format!("{} error(s)", errors.len()),
            duration: start.elapsed(),
        },
    }
}

/// Check the Ollama daemon answers the tags listing.
async fn check_ollama_daemon(config: &ShuntConfig) -> CheckResult {
    let start = Instant::now();
    let name = "Ollama daemon".to_string();

    let client = match OllamaClient::new(&config.ollama.base_url, Duration::from_secs(5)) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: start.elapsed(),
            };
        }
    };

    match client.list_models().await {
        Ok(models) => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: format!("reachable, {} model(s) installed", models.len()),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: format!("not reachable at {}: {e}", config.ollama.base_url),
            duration: start.elapsed(),
        },
    }
}

/// Check the configured local model is installed on the daemon.
async fn check_local_model(config: &ShuntConfig) -> CheckResult {
    let start = Instant::now();
    let name = "Local model".to_string();

    let wanted = config
        .model(&config.routing.local_profile)
        .map(|p| p.display_id.clone())
        .unwrap_or_else(|| config.routing.local_profile.clone());

    let client = match OllamaClient::new(&config.ollama.base_url, Duration::from_secs(5)) {
        Ok(client) => client,
        Err(e) => {
            return CheckResult {
                name,
                status: CheckStatus::Fail,
                message: e.to_string(),
                duration: start.elapsed(),
            };
        }
    };

    match client.list_models().await {
        Ok(models) if models.iter().any(|m| m.name == wanted) => CheckResult {
            name,
            status: CheckStatus::Pass,
            message: format!("{wanted} installed"),
            duration: start.elapsed(),
        },
        Ok(_) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: format!("{wanted} not installed (try: ollama pull {wanted})"),
            duration: start.elapsed(),
        },
        Err(e) => CheckResult {
            name,
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: start.elapsed(),
        },
    }
}

/// Check a cloud API key is available from config or the environment.
///
/// A missing key is a warning: local routing keeps working, only forced
/// cloud dispatches will fail.
fn check_api_key(name: &str, config_key: Option<&str>, env_var: &str) -> CheckResult {
    let start = Instant::now();
    let present = config_key.is_some_and(|k| !k.is_empty())
        || std::env::var(env_var).is_ok_and(|k| !k.is_empty());

    if present {
        CheckResult {
            name: name.to_string(),
            status: CheckStatus::Pass,
            message: "configured".to_string(),
            duration: start.elapsed(),
        }
    } else {
        CheckResult {
            name: name.to_string(),
            status: CheckStatus::Warn,
            message: format!("not set (config or {env_var})"),
            duration: start.elapsed(),
        }
    }
}
