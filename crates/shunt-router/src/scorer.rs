// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query complexity scoring.
//!
//! Scores user queries on [0.0, 1.0] using zero-cost additive rules. No LLM
//! pre-call, no network, no latency. A query at or above the threshold is
//! recommended for the cloud route; everything below stays local.

use serde::Serialize;

use shunt_core::Route;

/// Additive weight per complexity phrase (substring match, case-insensitive).
///
/// Every matching entry fires: overlapping entries each add their weight, so
/// "compare and contrast" also picks up the bare "compare" weight. No
/// stemming; "analysis" does not match "analyze".
const COMPLEX_PHRASES: &[(&str, f64)] = &[
    ("analyze deeply", 0.30),
    ("comprehensive analysis", 0.30),
    ("compare and contrast", 0.25),
    ("detailed explanation", 0.20),
    ("critically evaluate", 0.25),
    ("strategic planning", 0.20),
    ("analyze", 0.15),
    ("compare", 0.15),
    ("explain", 0.10),
    ("evaluate", 0.15),
    ("multiple", 0.10),
    ("complex", 0.15),
    ("various", 0.10),
];

/// Phrases asking for worked examples or step-by-step output (contains,
/// case-insensitive; fires at most once).
const EXAMPLE_PHRASES: &[&str] = &["step by step", "examples", "multiple examples"];

/// Single-fact lookup openers that pull the score down (contains,
/// case-insensitive; fires at most once).
const SIMPLE_OPENERS: &[&str] = &["what is", "who is", "when did", "where is"];

/// Default score at or above which a query is recommended for the cloud.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Result of scoring one query.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexityAnalysis {
    /// Complexity score clamped to [0.0, 1.0].
    pub score: f64,
    /// Human-readable score contributions in rule-evaluation order.
    pub factors: Vec<String>,
    /// Recommended route: cloud iff `score >= threshold`.
    pub route: Route,
    /// Threshold the score was compared against.
    pub threshold: f64,
}

/// Heuristic complexity scorer with a fixed routing threshold.
///
/// `analyze` is pure and total: the same query always produces the same
/// analysis, and no input can make it fail.
pub struct ComplexityScorer {
    threshold: f64,
}

impl ComplexityScorer {
    /// Create a scorer with the default threshold.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create a scorer with a custom routing threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a query and recommend a route.
    pub fn analyze(&self, query: &str) -> ComplexityAnalysis {
        let mut score = 0.0;
        let mut factors = Vec::new();

        // Signal 1: length.
        let word_count = query.split_whitespace().count();
        if word_count > 100 {
            score += 0.30;
            factors.push(format!("Long query ({word_count} words)"));
        } else if word_count > 50 {
            score += 0.15;
            factors.push(format!("Medium length ({word_count} words)"));
        }

        // Signal 2: complexity phrases.
        let lower = query.to_lowercase();
        for (phrase, weight) in COMPLEX_PHRASES {
            if lower.contains(phrase) {
                score += weight;
                factors.push(format!("Complex keyword: '{phrase}'"));
            }
        }

        // Signal 3: question marks.
        let question_marks = query.matches('?').count();
        if question_marks > 2 {
            score += 0.20;
            factors.push(format!("Multiple questions ({question_marks})"));
        } else if question_marks == 2 {
            score += 0.10;
            factors.push("Two questions".to_string());
        }

        // Signal 4: requests for examples or steps.
        if EXAMPLE_PHRASES.iter().any(|p| lower.contains(p)) {
            score += 0.15;
            factors.push("Requests examples/steps".to_string());
        }

        // Signal 5: simple lookup openers reduce the score.
        if SIMPLE_OPENERS.iter().any(|p| lower.contains(p)) {
            score -= 0.10;
            factors.push("Simple question format".to_string());
        }

        let score = score.clamp(0.0, 1.0);
        let route = if score >= self.threshold {
            Route::Cloud
        } else {
            Route::Local
        };

        ComplexityAnalysis {
            score,
            factors,
            route,
            threshold: self.threshold,
        }
    }
}

impl Default for ComplexityScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_scores_zero_local() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("");
        assert!((analysis.score - 0.0).abs() < f64::EPSILON);
        assert!(analysis.factors.is_empty());
        assert_eq!(analysis.route, Route::Local);
    }

    #[test]
    fn simple_lookup_clamps_to_zero_and_stays_local() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("What is HIPAA?");
        // Raw score is -0.1 from the simple opener; clamped to 0.
        assert!((analysis.score - 0.0).abs() < f64::EPSILON);
        assert_eq!(analysis.route, Route::Local);
        assert_eq!(analysis.factors, vec!["Simple question format".to_string()]);
    }

    #[test]
    fn overlapping_phrases_both_fire() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("please compare and contrast these options");
        // "compare and contrast" (0.25) and "compare" (0.15) both match.
        assert!(
            (analysis.score - 0.40).abs() < 1e-10,
            "expected 0.40, got {}",
            analysis.score
        );
        assert!(
            analysis
                .factors
                .contains(&"Complex keyword: 'compare and contrast'".to_string())
        );
        assert!(analysis.factors.contains(&"Complex keyword: 'compare'".to_string()));
    }

    #[test]
    fn no_stemming_analysis_does_not_match_analyze() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("the analysis was wrong");
        assert!(
            !analysis
                .factors
                .iter()
                .any(|f| f.contains("'analyze'")),
            "factors: {:?}",
            analysis.factors
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("ANALYZE the market");
        assert!(
            analysis
                .factors
                .contains(&"Complex keyword: 'analyze'".to_string())
        );
        assert!((analysis.score - 0.15).abs() < 1e-10);
    }

    #[test]
    fn two_questions_add_a_tenth() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("Is it fast? Is it safe?");
        assert!(analysis.factors.contains(&"Two questions".to_string()));
        assert!((analysis.score - 0.10).abs() < 1e-10);
    }

    #[test]
    fn three_questions_add_a_fifth() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze("Why? How? When?");
        assert!(analysis.factors.contains(&"Multiple questions (3)".to_string()));
        assert!((analysis.score - 0.20).abs() < 1e-10);
    }

    #[test]
    fn example_phrases_fire_once() {
        let scorer = ComplexityScorer::new();
        // Both "examples" and "step by step" are present but the rule adds 0.15 once.
        let analysis = scorer.analyze("show examples step by step");
        assert_eq!(
            analysis
                .factors
                .iter()
                .filter(|f| *f == "Requests examples/steps")
                .count(),
            1
        );
        assert!((analysis.score - 0.15).abs() < 1e-10);
    }

    #[test]
    fn medium_length_adds_fifteen_hundredths() {
        let scorer = ComplexityScorer::new();
        let query = (0..60).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let analysis = scorer.analyze(&query);
        assert!(analysis.factors.contains(&"Medium length (60 words)".to_string()));
        assert!((analysis.score - 0.15).abs() < 1e-10);
    }

    #[test]
    fn long_query_adds_three_tenths() {
        let scorer = ComplexityScorer::new();
        let query = (0..120).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let analysis = scorer.analyze(&query);
        assert!(analysis.factors.contains(&"Long query (120 words)".to_string()));
        assert!((analysis.score - 0.30).abs() < 1e-10);
    }

    #[test]
    fn dense_complex_query_routes_cloud() {
        let scorer = ComplexityScorer::new();
        let analysis = scorer.analyze(
            "Compare and contrast the two proposals and explain the trade-offs with examples.",
        );
        // compare and contrast 0.25 + compare 0.15 + explain 0.10 + examples 0.15.
        assert!(
            (analysis.score - 0.65).abs() < 1e-10,
            "expected 0.65, got {}",
            analysis.score
        );
        assert_eq!(analysis.route, Route::Cloud);
        assert_eq!(analysis.factors.len(), 4);
    }

    #[test]
    fn score_is_clamped_to_one() {
        let scorer = ComplexityScorer::new();
        // Stack every additive rule well past 1.0.
        let analysis = scorer.analyze(
            "analyze deeply and critically evaluate a comprehensive analysis; \
             compare and contrast multiple complex and various strategic planning \
             scenarios with a detailed explanation and multiple examples step by \
             step? also explain? and evaluate? once more?",
        );
        assert!((analysis.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(analysis.route, Route::Cloud);
    }

    #[test]
    fn analyze_is_idempotent() {
        let scorer = ComplexityScorer::new();
        let query = "Compare and contrast two options? Or three? Or more?";
        let first = scorer.analyze(query);
        let second = scorer.analyze(query);
        assert_eq!(first.score, second.score);
        assert_eq!(first.factors, second.factors);
        assert_eq!(first.route, second.route);
    }

    #[test]
    fn custom_threshold_moves_the_boundary() {
        let strict = ComplexityScorer::with_threshold(0.1);
        let analysis = strict.analyze("analyze this");
        assert_eq!(analysis.route, Route::Cloud);
        assert!((analysis.threshold - 0.1).abs() < f64::EPSILON);

        let lax = ComplexityScorer::with_threshold(0.9);
        assert_eq!(lax.analyze("analyze this").route, Route::Local);
    }

    #[test]
    fn score_exactly_at_threshold_routes_cloud() {
        let scorer = ComplexityScorer::with_threshold(0.15);
        let analysis = scorer.analyze("analyze the market");
        assert!((analysis.score - 0.15).abs() < 1e-10);
        assert_eq!(analysis.route, Route::Cloud);
    }
}
