//! Corpus-wide TF-IDF vectorization.
//!
//! [`TfIdfModel::fit`] builds a fixed vocabulary and a sparse document-term
//! matrix from one feature string per corpus document. Building is pure and
//! idempotent: the same corpus snapshot always yields the same vocabulary
//! and the same weights. The baseline and hybrid models are fit
//! independently and never share vocabulary or weights.

pub mod sparse;

use std::collections::HashSet;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus::{Corpus, Movie};

pub use sparse::SparseVec;

/// Which per-document feature string a model is fit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureSet {
    /// Normalized overview only
    Baseline,
    /// Normalized overview + genre tokens + keyword tokens
    Hybrid,
}

impl FeatureSet {
    /// The feature string this set selects from a document.
    pub fn select<'a>(&self, movie: &'a Movie) -> &'a str {
        match self {
            FeatureSet::Baseline => &movie.overview_clean,
            FeatureSet::Hybrid => &movie.tags,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FeatureSet::Baseline => "baseline",
            FeatureSet::Hybrid => "hybrid",
        }
    }
}

/// Term → column index mapping, assigned in first-seen corpus order.
///
/// A term absent from the corpus never appears here; there is no
/// out-of-vocabulary placeholder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexMap<Box<str>, u32>,
}

impl Vocabulary {
    /// Column index of `term`, if the corpus contains it.
    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.terms.get(term).copied()
    }

    /// Term at column `index`.
    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms
            .get_index(index as usize)
            .map(|(term, _)| term.as_ref())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(|term| term.as_ref())
    }
}

/// Fixed vocabulary plus sparse TF-IDF document-term matrix.
///
/// Rows are in corpus order, one per document, L2-normalized (a document
/// with an empty feature string keeps an all-zero row). The matrix is
/// immutable once fit and is 1:1 paired with the corpus snapshot it was
/// built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfModel {
    feature_set: FeatureSet,
    vocabulary: Vocabulary,
    rows: Vec<SparseVec>,
}

impl TfIdfModel {
    /// Fit a model on one feature string per corpus document.
    ///
    /// Weight = raw term count × smoothed IDF
    /// `ln((1 + n_docs) / (1 + doc_freq)) + 1`, rows L2-normalized. An empty
    /// corpus yields an empty vocabulary and zero rows.
    pub fn fit(corpus: &Corpus, feature_set: FeatureSet) -> Self {
        let tokenized: Vec<Vec<&str>> = corpus
            .movies()
            .iter()
            .map(|movie| feature_set.select(movie).split_whitespace().collect())
            .collect();

        // First pass: vocabulary in first-seen order + document frequencies.
        let mut terms: IndexMap<Box<str>, u32> = IndexMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        for tokens in &tokenized {
            let mut seen: HashSet<u32> = HashSet::with_capacity(tokens.len());
            for token in tokens {
                let next = terms.len() as u32;
                let col = *terms.entry(Box::from(*token)).or_insert(next);
                if col as usize == doc_freq.len() {
                    doc_freq.push(0);
                }
                if seen.insert(col) {
                    doc_freq[col as usize] += 1;
                }
            }
        }

        let n_docs = tokenized.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|df| ((1.0 + n_docs) / (1.0 + f64::from(*df))).ln() + 1.0)
            .collect();

        let vocabulary = Vocabulary { terms };

        // Second pass: per-document counts × idf, L2-normalized.
        let rows: Vec<SparseVec> = tokenized
            .par_iter()
            .map(|tokens| {
                let mut counts: IndexMap<u32, f64> = IndexMap::new();
                for token in tokens {
                    // every token was interned in the first pass
                    if let Some(col) = vocabulary.index_of(token) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                let pairs: Vec<(u32, f64)> = counts
                    .into_iter()
                    .map(|(col, count)| (col, count * idf[col as usize]))
                    .collect();
                let mut row = SparseVec::from_pairs(pairs);
                row.l2_normalize();
                row
            })
            .collect();

        info!(
            feature_set = feature_set.name(),
            documents = rows.len(),
            terms = vocabulary.len(),
            "tf-idf model fit"
        );

        TfIdfModel {
            feature_set,
            vocabulary,
            rows,
        }
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.feature_set
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Matrix row for a corpus document.
    pub fn row(&self, index: usize) -> Option<&SparseVec> {
        self.rows.get(index)
    }

    /// All rows, in corpus order.
    pub fn rows(&self) -> &[SparseVec] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Highest-weighted terms of one document, descending, positive weights
    /// only. Equal weights keep vocabulary column order.
    pub fn top_terms(&self, row: usize, limit: usize) -> Vec<(String, f64)> {
        let Some(row) = self.rows.get(row) else {
            return Vec::new();
        };
        let mut weighted: Vec<(String, f64)> = row
            .iter()
            .filter(|(_, weight)| *weight > 0.0)
            .filter_map(|(col, weight)| {
                self.vocabulary
                    .term(col)
                    .map(|term| (term.to_string(), weight))
            })
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
        weighted.truncate(limit);
        weighted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecord;

    fn corpus(overviews: &[&str]) -> Corpus {
        let records = overviews
            .iter()
            .enumerate()
            .map(|(i, overview)| RawRecord {
                title: format!("movie-{i}"),
                overview: overview.to_string(),
                ..RawRecord::default()
            })
            .collect();
        Corpus::from_records(records)
    }

    #[test]
    fn fit_is_deterministic() {
        let corpus = corpus(&[
            "A spaceship crew fights an alien",
            "A spaceship crew fights an alien invader",
            "A romantic comedy in Paris",
        ]);
        let a = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let b = TfIdfModel::fit(&corpus, FeatureSet::Baseline);

        assert_eq!(
            a.vocabulary().iter().collect::<Vec<_>>(),
            b.vocabulary().iter().collect::<Vec<_>>()
        );
        assert_eq!(a.rows(), b.rows());
    }

    #[test]
    fn rows_are_unit_norm_or_zero() {
        let corpus = corpus(&["spaceship crew alien", "", "romantic comedy"]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);

        assert_eq!(model.n_rows(), 3);
        assert!((model.row(0).unwrap().norm() - 1.0).abs() < 1e-9);
        assert!(model.row(1).unwrap().is_empty());
        assert!((model.row(2).unwrap().norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vocabulary_covers_exactly_the_corpus_terms() {
        let corpus = corpus(&["alien crew", "crew invader"]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);

        let vocab: Vec<&str> = model.vocabulary().iter().collect();
        assert_eq!(vocab, vec!["alien", "crew", "invad"]);
        assert_eq!(model.vocabulary().index_of("crew"), Some(1));
        assert_eq!(model.vocabulary().index_of("paris"), None);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        // "crew" appears in both documents, "alien" only in the first
        let corpus = corpus(&["crew alien", "crew invader"]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);

        let crew = model.vocabulary().index_of("crew").unwrap();
        let alien = model.vocabulary().index_of("alien").unwrap();
        let row = model.row(0).unwrap();
        assert!(row.get(alien) > row.get(crew));
    }

    #[test]
    fn empty_corpus_is_a_defined_edge_case() {
        let corpus = corpus(&[]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        assert_eq!(model.n_rows(), 0);
        assert!(model.vocabulary().is_empty());
    }

    #[test]
    fn baseline_and_hybrid_do_not_share_vocabulary() {
        let records = vec![RawRecord {
            title: "Alien".to_string(),
            overview: "A spaceship crew".to_string(),
            genres: r#"[{"name":"Science Fiction"}]"#.to_string(),
            ..RawRecord::default()
        }];
        let corpus = Corpus::from_records(records);

        let baseline = TfIdfModel::fit(&corpus, FeatureSet::Baseline);
        let hybrid = TfIdfModel::fit(&corpus, FeatureSet::Hybrid);

        assert_eq!(baseline.vocabulary().index_of("sciencefiction"), None);
        assert!(hybrid.vocabulary().index_of("sciencefiction").is_some());
    }

    #[test]
    fn rebuild_after_append_stays_deterministic() {
        let before = corpus(&["crew alien", "romantic comedy"]);
        let after = corpus(&["crew alien", "romantic comedy", "crew invader"]);

        let model_before = TfIdfModel::fit(&before, FeatureSet::Baseline);
        let model_after_a = TfIdfModel::fit(&after, FeatureSet::Baseline);
        let model_after_b = TfIdfModel::fit(&after, FeatureSet::Baseline);

        // pre-existing terms keep their column assignment after the append
        for (col, term) in model_before.vocabulary().iter().enumerate() {
            assert_eq!(model_after_a.vocabulary().index_of(term), Some(col as u32));
        }
        // and rebuilding the grown corpus is itself deterministic
        assert_eq!(model_after_a.rows(), model_after_b.rows());
    }

    #[test]
    fn top_terms_are_positive_and_descending() {
        let corpus = corpus(&["alien alien crew", "crew invader"]);
        let model = TfIdfModel::fit(&corpus, FeatureSet::Baseline);

        let top = model.top_terms(0, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "alien");
        assert!(top[0].1 >= top[1].1);
        assert!(top.iter().all(|(_, w)| *w > 0.0));

        assert!(model.top_terms(99, 10).is_empty());
    }
}
