//! Build-once, query-many recommendation engine.

use std::sync::Arc;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::rank::{top_n, Recommendation};
use crate::vectorizer::{FeatureSet, TfIdfModel};

/// Cached recommendation engine for one corpus snapshot.
///
/// Fitting the TF-IDF matrices is the expensive step, so both models are
/// built exactly once here and every query runs against the cached matrices.
/// All state is read-only after construction and `Arc`-shared: clones are
/// cheap handles onto the same corpus and matrices, safe for concurrent
/// readers without locking. A corpus refresh means building a new
/// `Recommender` and swapping the handle — readers see either the old or the
/// new snapshot, never a partial one.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Arc<Corpus>,
    baseline: Arc<TfIdfModel>,
    hybrid: Arc<TfIdfModel>,
}

impl Recommender {
    /// Fit both models from a corpus snapshot.
    pub fn new(corpus: Corpus) -> Self {
        let corpus = Arc::new(corpus);
        let baseline = Arc::new(TfIdfModel::fit(&corpus, FeatureSet::Baseline));
        let hybrid = Arc::new(TfIdfModel::fit(&corpus, FeatureSet::Hybrid));
        Recommender {
            corpus,
            baseline,
            hybrid,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The cached model for a feature set.
    pub fn model(&self, feature_set: FeatureSet) -> &TfIdfModel {
        match feature_set {
            FeatureSet::Baseline => &self.baseline,
            FeatureSet::Hybrid => &self.hybrid,
        }
    }

    /// Top-N recommendations for a corpus title.
    ///
    /// Errors with [`crate::Error::TitleNotFound`] for an unknown title.
    pub fn recommend(
        &self,
        feature_set: FeatureSet,
        title: &str,
        n: usize,
    ) -> Result<Vec<Recommendation>> {
        top_n(title, &self.corpus, self.model(feature_set), n)
    }
}
