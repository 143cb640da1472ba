// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shunt ask` and `shunt score` command implementations.
//!
//! One-shot counterparts to the shell: `ask` routes and answers a single
//! query, `score` runs the complexity scorer without touching the network.

use colored::Colorize;

use shunt_config::ShuntConfig;
use shunt_core::{Route, ShuntError};
use shunt_router::ComplexityScorer;

use crate::setup;

/// Runs `shunt ask`: score, dispatch, print, exit non-zero on failure.
pub async fn run_ask(
    config: &ShuntConfig,
    query: &str,
    route: Option<Route>,
) -> Result<(), ShuntError> {
    let app = setup::build(config)?;
    let outcome = app.router.execute(query, route).await;

    print_analysis(outcome.analysis.score, outcome.analysis.threshold, &outcome.analysis.factors);
    let forced_tag = if outcome.forced { " (forced)" } else { "" };
    println!("route: {}{forced_tag}", outcome.route);

    let result = &outcome.result;
    if result.success {
        if let Some(text) = &result.response_text {
            println!("\n{text}\n");
        }
        println!(
            "{}",
            format!(
                "{}  {:.2}s  {} in / {} out  ${:.6}",
                result.model_label,
                result.latency_seconds,
                result.input_tokens,
                result.output_tokens,
                result.cost_usd
            )
            .dimmed()
        );
        Ok(())
    } else {
        let message = result.error_message.as_deref().unwrap_or("unknown failure");
        Err(ShuntError::Internal(format!("dispatch failed: {message}")))
    }
}

/// Runs `shunt score`: scorer output only, no backend is ever contacted.
pub fn run_score(config: &ShuntConfig, query: &str) -> Result<(), ShuntError> {
    let scorer = ComplexityScorer::with_threshold(config.routing.threshold);
    let analysis = scorer.analyze(query);

    print_analysis(analysis.score, analysis.threshold, &analysis.factors);
    println!("route: {}", analysis.route);
    Ok(())
}

fn print_analysis(score: f64, threshold: f64, factors: &[String]) {
    println!("score: {score:.2} / threshold {threshold:.2}");
    if factors.is_empty() {
        println!("{}", "no complexity factors".dimmed());
    } else {
        for factor in factors {
            println!("  {factor}");
        }
    }
}
