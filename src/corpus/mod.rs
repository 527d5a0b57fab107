//! Corpus of movie documents.
//!
//! A [`Corpus`] is an ordered, immutable snapshot of preprocessed movies.
//! All derived fields (cleaned overview, parsed metadata, hybrid tags) are
//! computed once when the snapshot is built; rebuilding a corpus means going
//! back to the raw records.

pub mod loader;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::text::{normalize_text, parse_entities};

/// One raw dataset row, as loaded from CSV.
///
/// Optional columns default to empty rather than failing; unrelated dataset
/// columns are ignored at deserialization time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    /// JSON-encoded array of named entities
    #[serde(default)]
    pub genres: String,
    /// JSON-encoded array of named entities
    #[serde(default)]
    pub keywords: String,
}

/// One preprocessed movie document.
///
/// `overview_clean` and `tags` are the two feature strings the vectorizer
/// consumes: `overview_clean` alone for the baseline model, `tags`
/// (overview + genre tokens + keyword tokens) for the hybrid model.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    pub title: String,
    pub overview: String,
    /// Flattened genre tokens, source order preserved
    pub genres: Vec<String>,
    /// Flattened keyword tokens, source order preserved
    pub keywords: Vec<String>,
    pub overview_clean: String,
    pub tags: String,
}

impl Movie {
    fn from_record(record: RawRecord) -> Self {
        let overview_clean = normalize_text(&record.overview);
        let genres = parse_entities(&record.genres);
        let keywords = parse_entities(&record.keywords);
        let tags = format!(
            "{} {} {}",
            overview_clean,
            genres.join(" "),
            keywords.join(" ")
        );
        Movie {
            title: record.title,
            overview: record.overview,
            genres,
            keywords,
            overview_clean,
            tags,
        }
    }
}

/// Ordered, immutable collection of preprocessed movies with title lookup.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    movies: Vec<Movie>,
    /// title -> row index of its first occurrence
    title_index: HashMap<String, usize>,
}

impl Corpus {
    /// Preprocess raw records into a corpus snapshot.
    ///
    /// Row order is preserved. Duplicate titles are kept in the corpus but
    /// title lookup always resolves to the first occurrence; each duplicate
    /// is logged since lookup by title is ambiguous for those rows.
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let mut movies = Vec::with_capacity(records.len());
        let mut title_index = HashMap::with_capacity(records.len());

        for record in records {
            let movie = Movie::from_record(record);
            let row = movies.len();
            if title_index.contains_key(&movie.title) {
                warn!(title = %movie.title, row, "duplicate title, lookup resolves to first occurrence");
            } else {
                title_index.insert(movie.title.clone(), row);
            }
            movies.push(movie);
        }

        info!(documents = movies.len(), "corpus built");
        Corpus {
            movies,
            title_index,
        }
    }

    /// Row index of the first movie with this exact title.
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn get(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, overview: &str, genres: &str, keywords: &str) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            overview: overview.to_string(),
            genres: genres.to_string(),
            keywords: keywords.to_string(),
        }
    }

    #[test]
    fn preprocess_derives_all_fields() {
        let corpus = Corpus::from_records(vec![record(
            "Alien",
            "A spaceship crew fights an alien",
            r#"[{"name":"Science Fiction"},{"name":"Horror"}]"#,
            r#"[{"name":"space travel"}]"#,
        )]);

        let movie = corpus.get(0).unwrap();
        assert_eq!(movie.overview_clean, "spaceship crew fight alien");
        assert_eq!(movie.genres, vec!["sciencefiction", "horror"]);
        assert_eq!(movie.keywords, vec!["spacetravel"]);
        assert_eq!(
            movie.tags,
            "spaceship crew fight alien sciencefiction horror spacetravel"
        );
    }

    #[test]
    fn missing_fields_degrade_to_empty() {
        let corpus = Corpus::from_records(vec![record("Untitled", "", "", "")]);
        let movie = corpus.get(0).unwrap();
        assert_eq!(movie.overview_clean, "");
        assert!(movie.genres.is_empty());
        assert!(movie.keywords.is_empty());
    }

    #[test]
    fn title_lookup_is_exact() {
        let corpus = Corpus::from_records(vec![
            record("Batman", "", "", ""),
            record("Batman Returns", "", "", ""),
        ]);
        assert_eq!(corpus.index_of("Batman"), Some(0));
        assert_eq!(corpus.index_of("Batman Returns"), Some(1));
        assert_eq!(corpus.index_of("batman"), None);
    }

    #[test]
    fn duplicate_titles_resolve_to_first_occurrence() {
        let corpus = Corpus::from_records(vec![
            record("Batman", "first", "", ""),
            record("Batman", "second", "", ""),
        ]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.index_of("Batman"), Some(0));
    }
}
