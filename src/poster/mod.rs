//! Poster-image lookup against the TMDB search API.
//!
//! A presentation-layer concern: the engine never calls this. Given a title,
//! the client runs a keyed text search and returns the first result's poster
//! URL, or `None` when TMDB has no match or no poster for it.

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// Shared blocking HTTP client, pooled across lookups.
static HTTP_CLIENT: Lazy<reqwest::blocking::Client> = Lazy::new(|| {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("reelrank/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("failed to build HTTP client")
});

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    poster_path: Option<String>,
}

/// TMDB movie-search client.
pub struct TmdbClient {
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        TmdbClient {
            api_key: api_key.into(),
        }
    }

    /// Build a client from the `TMDB_API_KEY` environment variable.
    pub fn from_env() -> Option<Self> {
        std::env::var("TMDB_API_KEY").ok().map(TmdbClient::new)
    }

    /// Poster image URL for a movie title, `None` when TMDB has no usable
    /// result. HTTP failures surface as errors; an empty result list does
    /// not.
    pub fn poster_url(&self, title: &str) -> Result<Option<String>> {
        let response: SearchResponse = HTTP_CLIENT
            .get(format!("{BASE_URL}/search/movie"))
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()?
            .error_for_status()?
            .json()?;

        let poster = response
            .results
            .first()
            .and_then(|hit| hit.poster_path.as_deref())
            .map(|path| format!("{IMAGE_BASE}{path}"));
        debug!(title = %title, found = poster.is_some(), "poster lookup");
        Ok(poster)
    }
}
