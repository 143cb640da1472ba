// SPDX-FileCopyrightText: 2026 Shunt Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment deserialization failures into miette diagnostics.
//!
//! Unknown-key errors get a source span pointing at the offending key in
//! the TOML file, the list of keys the section accepts, and a fuzzy-match
//! suggestion when a valid key is close enough.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches one-transposition typos like `treshold` -> `threshold`
/// without suggesting matches for garbage input.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error carrying enough context for miette to render
/// an Elm-style report: span, suggestion, and valid key listing.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the section's schema does not accept.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(shunt::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The unrecognized key name.
        key: String,
        /// Closest valid key, if one scores above the similarity threshold.
        suggestion: Option<String>,
        /// Comma-separated keys the section accepts.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose TOML type does not match the schema.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(
        code(shunt::config::invalid_type),
        help("expected {expected}")
    )]
    InvalidType {
        /// Dotted path of the key with the wrong type.
        key: String,
        /// Description of the mismatch.
        detail: String,
        /// What type was expected.
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required key the configuration never supplies.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(shunt::config::missing_key),
        help("add `{key} = <value>` to your shunt.toml")
    )]
    MissingKey {
        /// The missing key name.
        key: String,
    },

    /// A value that deserialized fine but failed a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(shunt::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Anything Figment reports that does not fit the variants above.
    #[error("configuration error: {0}")]
    #[diagnostic(code(shunt::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(candidate) => format!("did you mean `{candidate}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into one `ConfigError` per underlying failure.
///
/// Figment batches every deserialization problem into a single error value;
/// iterating it yields the individual failures, which are classified here.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| classify_error(e, toml_sources))
        .collect()
}

fn classify_error(error: figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            unknown_key_error(field, expected, &error, toml_sources)
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.to_string(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn unknown_key_error(
    field: &str,
    expected: &[&str],
    error: &figment::Error,
    toml_sources: &[(String, String)],
) -> ConfigError {
    let (span, src) = match locate_key(error, field, toml_sources) {
        Some((span, src)) => (Some(span), Some(src)),
        None => (None, None),
    };

    ConfigError::UnknownKey {
        key: field.to_string(),
        suggestion: suggest_key(field, expected),
        valid_keys: expected.join(", "),
        span,
        src,
    }
}

/// Resolve an unknown key to a span in the TOML file it came from.
///
/// Only file-backed Figment sources can be located; errors from env vars
/// or programmatic providers have no span.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let path = match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(p) => p.display().to_string(),
        _ => return None,
    };
    let (_, content) = toml_sources.iter().find(|(p, _)| *p == path)?;

    let offset = find_key_offset(content, &error.path, field)?;
    let span = SourceSpan::new(offset.into(), field.len());
    Some((span, NamedSource::new(path, content.clone())))
}

/// Find the byte offset of a key in TOML content, scoped to a section.
///
/// With `path = ["routing"]` and `field = "treshold"` the scan starts just
/// past the `[routing]` header; with an empty path it starts at the top of
/// the file. A line matches when it opens with the field name (after any
/// indent) followed by whitespace or `=`.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let scan_from = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    let mut cursor = scan_from;
    for line in content[scan_from..].split_inclusive('\n') {
        let key = line.trim_start();
        let indent = line.len() - key.len();
        let matches = key
            .strip_prefix(field)
            .is_some_and(|rest| matches!(rest.bytes().next(), Some(b' ' | b'\t' | b'=')));
        if matches {
            return Some(cursor + indent);
        }
        cursor += line.len();
    }

    None
}

/// Pick the valid key most similar to `unknown`, by Jaro-Winkler score.
///
/// Returns `None` when nothing scores above the suggestion threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_treshold_for_threshold() {
        let valid = &["threshold", "local_profile", "cloud_profile"];
        assert_eq!(suggest_key("treshold", valid), Some("threshold".to_string()));
    }

    #[test]
    fn suggest_api_kye_for_api_key() {
        let valid = &["api_key", "api_version", "max_tokens", "timeout_secs"];
        assert_eq!(suggest_key("api_kye", valid), Some("api_key".to_string()));
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["threshold", "local_profile", "cloud_profile"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[routing]\ntreshold = 0.6\n";
        let path = vec!["routing".to_string()];
        let offset = find_key_offset(content, &path, "treshold");
        assert!(offset.is_some());
        let o = offset.unwrap();
        assert_eq!(&content[o..o + 8], "treshold");
    }

    #[test]
    fn find_key_offset_top_level() {
        let content = "verbose = true\n[routing]\nthreshold = 0.6\n";
        let offset = find_key_offset(content, &[], "verbose");
        assert_eq!(offset, Some(0));
    }

    #[test]
    fn find_key_offset_skips_prefix_collisions() {
        // `threshold_mode` must not match a search for `threshold`.
        let content = "[routing]\nthreshold_mode = \"strict\"\nthreshold = 0.6\n";
        let path = vec!["routing".to_string()];
        let offset = find_key_offset(content, &path, "threshold").unwrap();
        assert_eq!(&content[offset..offset + 9], "threshold");
        assert!(content[offset..].starts_with("threshold ="));
    }

    #[test]
    fn find_key_offset_missing_section() {
        let content = "[routing]\nthreshold = 0.6\n";
        let path = vec!["ollama".to_string()];
        assert_eq!(find_key_offset(content, &path, "base_url"), None);
    }
}
