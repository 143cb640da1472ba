// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shunt shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Every line is scored, routed, dispatched, and (on success) recorded in
//! the session ledger; a savings summary is printed on exit.

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use shunt_config::ShuntConfig;
use shunt_core::{Route, ShuntError};
use shunt_router::QueryOutcome;

use crate::setup::{self, App};

/// The two canned queries offered by `/examples`.
const EXAMPLE_SIMPLE: &str = "What is HIPAA?";
const EXAMPLE_COMPLEX: &str = "Analyze the legal implications of using AI for patient \
     diagnosis in Hawaii, considering HIPAA compliance, malpractice liability, and state \
     regulations. Provide detailed examples and risk mitigation strategies.";

/// Runs the `shunt shell` interactive REPL.
pub async fn run_shell(config: &ShuntConfig) -> Result<(), ShuntError> {
    let app = setup::build(config)?;

    let mut rl = DefaultEditor::new().map_err(|e| {
        ShuntError::Internal(format!("failed to initialize readline: {e}"))
    })?;

    println!("{}", "shunt shell".bold().green());
    println!(
        "local: {}  cloud: {}  threshold: {:.2}",
        app.local_profile.display_id.cyan(),
        app.cloud_profile.display_id.magenta(),
        config.routing.threshold
    );
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let prompt = format!("{}> ", "shunt".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/help" => print_help(),
                    "/stats" => print_stats(&app),
                    "/history" => print_history(&app),
                    "/models" => print_models(&app),
                    "/examples" => print_examples(),
                    "/clear" => {
                        app.ledger.clear();
                        println!("{}", "session history cleared".dimmed());
                    }
                    query => {
                        let outcome = app.router.execute(query, None).await;
                        print_outcome(&outcome);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C clears the current line; the session continues.
                debug!("readline interrupted");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    print_exit_summary(&app);
    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn print_outcome(outcome: &QueryOutcome) {
    let route_tag = match outcome.route {
        Route::Local => "local".cyan(),
        Route::Cloud => "cloud".magenta(),
    };
    let forced_tag = if outcome.forced { " (forced)" } else { "" };
    println!(
        "{} {}{} score {:.2} / threshold {:.2}",
        "->".dimmed(),
        route_tag,
        forced_tag.dimmed(),
        outcome.analysis.score,
        outcome.analysis.threshold
    );
    for factor in &outcome.analysis.factors {
        println!("   {}", factor.dimmed());
    }

    let result = &outcome.result;
    if result.success {
        if let Some(text) = &result.response_text {
            println!("\n{text}\n");
        }
        let throughput = result
            .tokens_per_second
            .map(|tps| format!("  {tps:.1} tok/s"))
            .unwrap_or_default();
        println!(
            "{}",
            format!(
                "{}  {:.2}s  {} in / {} out  ${:.6}{throughput}",
                result.model_label,
                result.latency_seconds,
                result.input_tokens,
                result.output_tokens,
                result.cost_usd
            )
            .dimmed()
        );
    } else {
        let message = result.error_message.as_deref().unwrap_or("unknown failure");
        eprintln!("{}: {message}", "error".red());
    }
}

fn print_help() {
    println!("  /help      show this help");
    println!("  /stats     session counts, cost, and estimated savings");
    println!("  /history   last 10 completed queries, most recent first");
    println!("  /models    active local and cloud model profiles");
    println!("  /examples  sample queries to try");
    println!("  /clear     discard session history");
    println!("  /quit      exit (also /exit or Ctrl+D)");
    println!();
    println!("  Prefix a query with {} or {} to force the route.", "/local".cyan(), "/cloud".magenta());
}

fn print_stats(app: &App) {
    let stats = app.ledger.stats();
    println!("  queries:   {} total ({} local, {} cloud)", stats.total_count, stats.local_count, stats.cloud_count);
    println!("  spend:     ${:.6}", stats.total_cost_usd);
    println!(
        "  savings:   ${:.6} ({:.1}% vs. all-cloud)",
        stats.estimated_savings_usd, stats.estimated_savings_pct
    );
}

fn print_history(app: &App) {
    let entries = app.ledger.snapshot();
    if entries.is_empty() {
        println!("{}", "  no queries yet".dimmed());
        return;
    }
    for entry in entries.iter().rev().take(10) {
        let query = truncate(&entry.query, 48);
        println!(
            "  [{}] {:<5} {}  {:.2}s  ${:.6}  score {:.2}",
            entry.timestamp_utc.format("%H:%M:%S"),
            entry.route,
            query,
            entry.latency_seconds,
            entry.cost_usd,
            entry.complexity_score
        );
    }
}

fn print_models(app: &App) {
    for profile in [&app.local_profile, &app.cloud_profile] {
        let price = if profile.is_local() {
            "free".to_string()
        } else {
            format!(
                "${:.2} in / ${:.2} out per MTok",
                profile.price_per_mtok_input, profile.price_per_mtok_output
            )
        };
        println!("  {:<6} {}  ({price})", profile.provider, profile.display_id.bold());
        println!("         {}", profile.description.dimmed());
    }
}

fn print_examples() {
    println!("  simple:  {EXAMPLE_SIMPLE}");
    println!("  complex: {EXAMPLE_COMPLEX}");
}

fn print_exit_summary(app: &App) {
    let stats = app.ledger.stats();
    if stats.total_count > 0 {
        println!(
            "{}",
            format!(
                "session: {} queries, ${:.6} spent, ${:.6} saved ({:.1}%)",
                stats.total_count,
                stats.total_cost_usd,
                stats.estimated_savings_usd,
                stats.estimated_savings_pct
            )
            .dimmed()
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
