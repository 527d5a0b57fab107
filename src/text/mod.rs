//! Deterministic text normalization for corpus features.
//!
//! Raw overview text goes through case folding, non-letter stripping,
//! tokenization, stopword removal and stemming; structured metadata (JSON
//! arrays of named entities) flattens into lowercased, whitespace-free
//! tokens. Both transforms are total: malformed input produces empty output,
//! never an error.

pub mod stopwords;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde_json::Value;

pub use stopwords::is_stopword;

/// Shared English stemmer (Porter2 rule table).
///
/// The table is a pinned correctness dependency: recommendation quality
/// depends on which fixed rules are used, so it must not change between runs.
static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Normalize raw free text into a space-joined stream of stemmed tokens.
///
/// Steps, in order: lowercase; replace every character outside `[a-z]` and
/// whitespace with a space; split on whitespace; drop stopwords; stem the
/// survivors; rejoin with single spaces.
///
/// Deterministic: the same input yields a byte-identical output on every
/// call.
pub fn normalize_text(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let letters_only: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let stems: Vec<String> = letters_only
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(|token| STEMMER.stem(token).into_owned())
        .collect();

    stems.join(" ")
}

/// Parse a JSON-encoded array of named entities into flat tokens.
///
/// Each object with a string `name` contributes one token: the name
/// lowercased with all internal whitespace removed ("Science Fiction" →
/// "sciencefiction"). Entity order is preserved. Objects without a usable
/// `name` are skipped; malformed JSON or a non-array yields an empty list.
pub fn parse_entities(raw: &str) -> Vec<String> {
    let entities: Vec<Value> = match serde_json::from_str(raw) {
        Ok(entities) => entities,
        Err(_) => return Vec::new(),
    };

    entities
        .iter()
        .filter_map(|entity| entity.get("name").and_then(Value::as_str))
        .map(|name| {
            name.to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .concat()
        })
        .collect()
}
