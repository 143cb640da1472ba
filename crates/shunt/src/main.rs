// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shunt - a hybrid local/cloud LLM query router.
//!
//! This is the binary entry point. Queries are scored for complexity and
//! routed to a free local model or a paid cloud model; every completed query
//! is recorded in the session ledger for cost and savings reporting.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod ask;
mod doctor;
mod models;
mod setup;
mod shell;

use clap::{Parser, Subcommand};

use shunt_core::Route;

/// Shunt - route queries between a free local model and paid cloud models.
#[derive(Parser, Debug)]
#[command(name = "shunt", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive routing session (the default).
    Shell,
    /// Route and answer a single query, then exit.
    Ask {
        /// The query text.
        query: String,
        /// Force the route instead of following the complexity score.
        #[arg(long)]
        route: Option<Route>,
    },
    /// Score a query without dispatching it. No network access.
    Score {
        /// The query text.
        query: String,
    },
    /// List the model catalog and locally installed models.
    Models,
    /// Run environment diagnostics.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match shunt_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            shunt_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.runtime.log_level);

    let outcome = match cli.command {
        Some(Commands::Ask { query, route }) => ask::run_ask(&config, &query, route).await,
        Some(Commands::Score { query }) => ask::run_score(&config, &query),
        Some(Commands::Models) => models::run_models(&config).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        Some(Commands::Shell) | None => shell::run_shell(&config).await,
    };

    if let Err(e) = outcome {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with an env-filter default.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shunt={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
