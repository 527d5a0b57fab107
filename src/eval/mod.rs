//! Offline evaluation harness.
//!
//! Measures recommendation quality over a fixed list of test titles. A
//! recommendation is *relevant* when it shares at least one genre token with
//! the query movie. The harness is a consumer of the engine: it only calls
//! [`Recommender::recommend`] and reads the corpus.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::Recommender;
use crate::vectorizer::FeatureSet;

/// Metrics for one test title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalRow {
    pub title: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Evaluate one model variant over a list of test titles.
///
/// Per title: take the top `top_n` recommendations, count those sharing a
/// genre token with the query, then
/// precision = relevant / `top_n` (the requested N, even if fewer rows came
/// back), recall = relevant / total documents in the corpus sharing a genre
/// token (the query document included), F1 = harmonic mean. Test titles
/// absent from the corpus are skipped with a warning, not errors.
pub fn evaluate(
    engine: &Recommender,
    feature_set: FeatureSet,
    test_titles: &[String],
    top_n: usize,
) -> Vec<EvalRow> {
    let corpus = engine.corpus();
    let mut rows = Vec::with_capacity(test_titles.len());

    for title in test_titles {
        let Some(query_row) = corpus.index_of(title) else {
            warn!(title = %title, "test title not in corpus, skipped");
            continue;
        };
        let query_genres: HashSet<&str> = corpus
            .get(query_row)
            .map(|movie| movie.genres.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let recommendations = match engine.recommend(feature_set, title, top_n) {
            Ok(recommendations) => recommendations,
            Err(_) => continue,
        };

        let shares_genre = |genres: &[String]| {
            genres
                .iter()
                .any(|genre| query_genres.contains(genre.as_str()))
        };

        let relevant = recommendations
            .iter()
            .filter(|rec| {
                corpus
                    .index_of(&rec.title)
                    .and_then(|row| corpus.get(row))
                    .is_some_and(|movie| shares_genre(&movie.genres))
            })
            .count();

        let total_relevant = corpus
            .movies()
            .iter()
            .filter(|movie| shares_genre(&movie.genres))
            .count();

        let precision = if top_n > 0 {
            relevant as f64 / top_n as f64
        } else {
            0.0
        };
        let recall = if total_relevant > 0 {
            relevant as f64 / total_relevant as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        debug!(title = %title, relevant, total_relevant, "evaluated");
        rows.push(EvalRow {
            title: title.clone(),
            precision,
            recall,
            f1,
        });
    }

    rows
}
