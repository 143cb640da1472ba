// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token estimation, cost calculation, and throughput math.
//!
//! Token estimation is deliberately rough: roughly four characters per token,
//! used only when a backend does not report authoritative counts. Cloud
//! backends always report real counts, so the estimate only ever prices the
//! local model, which is free anyway.

/// Estimate the token count of a text as character count divided by four,
/// floored. Returns 0 for the empty string.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.chars().count() / 4) as u32
}

/// Calculate cost in USD for a token usage against per-million-token prices.
///
/// Formula: (tokens / 1_000_000) * price_per_million, summed over input and
/// output. Zero tokens or zero prices yield 0.0 exactly.
pub fn compute_cost(
    input_tokens: u32,
    output_tokens: u32,
    price_in_per_mtok: f64,
    price_out_per_mtok: f64,
) -> f64 {
    let input = (input_tokens as f64 / 1_000_000.0) * price_in_per_mtok;
    let output = (output_tokens as f64 / 1_000_000.0) * price_out_per_mtok;
    input + output
}

/// Output tokens per second of elapsed wall-clock time.
///
/// Returns `None` when the elapsed time is not positive, so a degenerate
/// measurement can never divide by zero.
pub fn tokens_per_second(output_tokens: u32, elapsed_seconds: f64) -> Option<f64> {
    if elapsed_seconds > 0.0 {
        Some(output_tokens as f64 / elapsed_seconds)
    } else {
        None
    }
}
