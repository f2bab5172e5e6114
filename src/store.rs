//! In-memory record store and shared application state
//!
//! Both record lists are built once at startup and never mutated afterwards,
//! so the store is shared between handlers behind an `Arc` without any locking.

use std::sync::Arc;

use crate::lookup::{self, LookupError};
use crate::model::{Movie, ShortUrl};

/// Owner of the short URL and movie records
///
/// Records keep their insertion order; list endpoints return them in that order
/// and lookups scan them front to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    short_urls: Vec<ShortUrl>,
    movies: Vec<Movie>,
}

impl RecordStore {
    /// Builds a store from arbitrary records
    ///
    /// Key uniqueness is not checked. When two records share a key,
    /// lookups return the one inserted first.
    pub fn new(short_urls: Vec<ShortUrl>, movies: Vec<Movie>) -> Self {
        Self { short_urls, movies }
    }

    /// Builds the store with the records the service ships with
    pub fn seeded() -> Self {
        Self::new(seed_short_urls(), seed_movies())
    }

    pub fn short_urls(&self) -> &[ShortUrl] {
        &self.short_urls
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn find_short_url(&self, slug: &str) -> Result<&ShortUrl, LookupError> {
        lookup::find_by_slug(&self.short_urls, slug)
    }

    pub fn find_movie(&self, movie_id: i64) -> Result<&Movie, LookupError> {
        lookup::find_by_id(&self.movies, movie_id)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_short_urls() -> Vec<ShortUrl> {
    vec![
        ShortUrl::new("example", "https://example.com/"),
        ShortUrl::new("search", "https://google.com/"),
    ]
}

fn seed_movies() -> Vec<Movie> {
    vec![
        Movie {
            movie_id: 301,
            name: "Matrix".to_string(),
            description: "some desc".to_string(),
            rating: "9.5".to_string(),
            age_rating: "18+".to_string(),
            url: "https://www.kinopoisk.ru/film/301/".to_string(),
        },
        Movie {
            movie_id: 328,
            name: "Lord of the rings".to_string(),
            description: "some desc".to_string(),
            rating: "10".to_string(),
            age_rating: "18+".to_string(),
            url: "https://www.kinopoisk.ru/film/328/".to_string(),
        },
    ]
}

/// Application state shared across all request handlers
///
/// Cloning is cheap: only the `Arc` is cloned, the records are not.
#[derive(Clone)]
pub struct AppState {
    /// Read-only record store
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RecordStore::seeded())
    }
}
