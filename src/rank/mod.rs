//! Cosine-similarity ranking over a fit TF-IDF matrix.

use rayon::prelude::*;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::vectorizer::{SparseVec, TfIdfModel};

/// One ranked result: a corpus title and its similarity score in `[0, 1]`,
/// rounded to 4 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

/// Cosine similarity, computed defensively.
///
/// Rows coming out of [`TfIdfModel::fit`] are already unit length, so the
/// division is normally a no-op; it is still performed so the result stays
/// correct for unnormalized vectors, and a zero norm on either side yields
/// similarity 0 instead of NaN.
pub fn cosine(a: &SparseVec, b: &SparseVec) -> f64 {
    let norms = a.norm() * b.norm();
    if norms == 0.0 {
        return 0.0;
    }
    a.dot(b) / norms
}

/// Round to 4 decimal places, half away from zero.
fn round4(score: f64) -> f64 {
    (score * 1e4).round() / 1e4
}

/// Top-N most similar documents to `title`, by cosine similarity.
///
/// The title is resolved by exact match against the corpus (first occurrence
/// wins); an unknown title is the one caller mistake this module surfaces,
/// as [`Error::TitleNotFound`]. The query document itself is excluded — only
/// the resolved row, not every row sharing the title. Results are sorted by
/// descending score; equal scores keep ascending corpus order (stable sort),
/// so repeated runs over the same corpus reproduce the same ranking.
/// Returns `min(n, rows - 1)` results.
pub fn top_n(
    title: &str,
    corpus: &Corpus,
    model: &TfIdfModel,
    n: usize,
) -> Result<Vec<Recommendation>> {
    let query_row = corpus
        .index_of(title)
        .ok_or_else(|| Error::TitleNotFound(title.to_string()))?;
    // the matrix is 1:1 with the corpus it was fit on
    debug_assert_eq!(model.n_rows(), corpus.len());

    let query = match model.row(query_row) {
        Some(query) => query,
        None => return Ok(Vec::new()),
    };

    let mut scored: Vec<(usize, f64)> = model
        .rows()
        .par_iter()
        .enumerate()
        .map(|(row, vec)| (row, cosine(query, vec)))
        .collect();

    scored.retain(|(row, _)| *row != query_row);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(n);

    Ok(scored
        .into_iter()
        .filter_map(|(row, score)| {
            corpus.get(row).map(|movie| Recommendation {
                title: movie.title.clone(),
                score: round4(score),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecord;
    use crate::vectorizer::FeatureSet;

    fn corpus(docs: &[(&str, &str)]) -> Corpus {
        let records = docs
            .iter()
            .map(|(title, overview)| RawRecord {
                title: title.to_string(),
                overview: overview.to_string(),
                ..RawRecord::default()
            })
            .collect();
        Corpus::from_records(records)
    }

    fn spaceship_corpus() -> Corpus {
        corpus(&[
            ("A", "A spaceship crew fights an alien"),
            ("B", "A spaceship crew fights an alien invader"),
            ("C", "A romantic comedy in Paris"),
        ])
    }

    #[test]
    fn unknown_title_is_an_error() {
        let corpus = spaceship_corpus();
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let err = top_n("Nope", &corpus, &model, 5).unwrap_err();
        assert!(matches!(err, Error::TitleNotFound(title) if title == "Nope"));
    }

    #[test]
    fn query_document_is_never_included() {
        let corpus = spaceship_corpus();
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let results = top_n("A", &corpus, &model, 10).unwrap();
        assert!(results.iter().all(|r| r.title != "A"));
    }

    #[test]
    fn returns_min_of_n_and_corpus_minus_one() {
        let corpus = spaceship_corpus();
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        assert_eq!(top_n("A", &corpus, &model, 1).unwrap().len(), 1);
        assert_eq!(top_n("A", &corpus, &model, 2).unwrap().len(), 2);
        assert_eq!(top_n("A", &corpus, &model, 1000).unwrap().len(), 2);
    }

    #[test]
    fn nearest_overview_ranks_first() {
        let corpus = spaceship_corpus();
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let results = top_n("A", &corpus, &model, 2).unwrap();

        assert_eq!(results[0].title, "B");
        assert_eq!(results[1].title, "C");
        assert!(results[0].score > results[1].score);
        assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn scores_descend_and_ties_keep_corpus_order() {
        // B and C are identical documents, both tied against the query
        let corpus = corpus(&[
            ("Q", "alien crew"),
            ("B", "alien crew spaceship"),
            ("C", "alien crew spaceship"),
            ("D", "romantic comedy"),
        ]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let results = top_n("Q", &corpus, &model, 10).unwrap();

        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        let b = results.iter().position(|r| r.title == "B").unwrap();
        let c = results.iter().position(|r| r.title == "C").unwrap();
        assert!(b < c, "tied scores must keep corpus order");
    }

    #[test]
    fn zero_vector_query_scores_zero_everywhere() {
        // "the" normalizes away entirely, leaving an all-zero row
        let corpus = corpus(&[("Empty", "the"), ("B", "alien crew"), ("C", "")]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let results = top_n("Empty", &corpus, &model, 10).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn scores_are_rounded_to_four_decimals() {
        let corpus = spaceship_corpus();
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        for rec in top_n("A", &corpus, &model, 10).unwrap() {
            assert_eq!(rec.score, round4(rec.score));
        }
    }

    #[test]
    fn round4_is_half_away_from_zero() {
        assert_eq!(round4(0.12345), 0.1235);
        assert_eq!(round4(0.123449), 0.1234);
        assert_eq!(round4(1.0), 1.0);
    }

    #[test]
    fn duplicate_title_excludes_only_the_resolved_row() {
        let corpus = corpus(&[("Twin", "alien crew"), ("Twin", "alien crew")]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let results = top_n("Twin", &corpus, &model, 10).unwrap();

        // the second row shares the title but is still a candidate
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Twin");
        assert_eq!(results[0].score, 1.0);
    }
}
