//! Content-based movie recommendation engine.
//!
//! Movies are described by free text (overview) and structured tags (genres,
//! keywords); both are normalized into token streams, vectorized corpus-wide
//! with TF-IDF, and ranked by cosine similarity. Two model variants exist
//! side by side: **baseline** (overview only) and **hybrid** (overview +
//! genre + keyword tokens), fit independently over the same corpus.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use reelrank::{corpus::loader, FeatureSet, Recommender};
//!
//! let corpus = loader::load_corpus("data/tmdb_5000_movies.csv")?;
//! let engine = Recommender::new(corpus);
//! for rec in engine.recommend(FeatureSet::Hybrid, "Batman", 10)? {
//!     println!("{} {:.4}", rec.title, rec.score);
//! }
//! ```

pub mod corpus;
pub mod engine;
pub mod error;
pub mod eval;
pub mod poster;
pub mod rank;
pub mod text;
pub mod vectorizer;

/// Build-once, query-many recommendation engine.
/// Fits the baseline and hybrid TF-IDF models exactly once per corpus
/// snapshot and serves every query against the cached matrices. `Arc`-shared
/// internally: clones are cheap read-only handles, safe across concurrent
/// readers; refreshing the corpus means building a new `Recommender` and
/// swapping the handle.
pub use engine::Recommender;

/// Feature selector for a model variant.
/// `Baseline` fits on the normalized overview alone; `Hybrid` fits on the
/// overview plus flattened genre and keyword tokens. The two variants never
/// share vocabulary or weights.
pub use vectorizer::FeatureSet;

/// Fixed vocabulary plus sparse TF-IDF document-term matrix for one corpus
/// snapshot. Fitting is pure and deterministic; rows are L2-normalized.
pub use vectorizer::TfIdfModel;

/// One ranked result: corpus title and cosine score rounded to 4 decimals.
pub use rank::Recommendation;

/// Crate error type. Only `TitleNotFound` crosses the engine boundary as a
/// reportable failure; malformed text and metadata degrade to empty output.
pub use error::{Error, Result};
