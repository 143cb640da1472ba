// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shunt models` command implementation.
//!
//! Prints the configured model catalog and, best-effort, the models
//! installed on the local Ollama daemon. An unreachable daemon is reported
//! as "no local models", never as a crash.

use std::time::Duration;

use colored::Colorize;

use shunt_config::ShuntConfig;
use shunt_core::ShuntError;
use shunt_ollama::client::OllamaClient;

/// Runs `shunt models`.
pub async fn run_models(config: &ShuntConfig) -> Result<(), ShuntError> {
    println!("{}", "model catalog".bold());
    for profile in &config.models {
        let price = if profile.is_local() {
            "free".to_string()
        } else {
            format!(
                "${:.2} in / ${:.2} out per MTok",
                profile.price_per_mtok_input, profile.price_per_mtok_output
            )
        };
        println!(
            "  {:<18} {:<9} {}  ({price})",
            profile.key,
            profile.provider.to_string(),
            profile.display_id.bold()
        );
        if !profile.best_for.is_empty() {
            println!("  {:<18} best for: {}", "", profile.best_for.join(", ").dimmed());
        }
    }

    println!("\n{}", "installed local models".bold());
    let client = OllamaClient::new(&config.ollama.base_url, Duration::from_secs(10))?;
    match client.list_models().await {
        Ok(models) if !models.is_empty() => {
            for model in models {
                let gib = model.size as f64 / (1024.0 * 1024.0 * 1024.0);
                println!("  {:<24} {gib:.1} GiB", model.name);
            }
        }
        Ok(_) => {
            println!("{}", "  none installed".dimmed());
        }
        Err(e) => {
            println!("{}", format!("  no local models available ({e})").dimmed());
        }
    }

    Ok(())
}
