//! Data models for the URL shortener application
//!
//! This module defines the two record types served by the application
//! and the query parameters and body of the root endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A short identifier that redirects to a target URL
///
/// # Example
/// ```json
/// {
///   "slug": "example",
///   "target_url": "https://example.com/"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ShortUrl {
    /// Lookup key, expected to be unique among all short URLs
    pub slug: String,

    /// Destination of the redirect, stored as-is
    pub target_url: String,
}

impl ShortUrl {
    pub fn new(slug: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            target_url: target_url.into(),
        }
    }
}

/// A movie entry that can be viewed or redirected to by its numeric id
///
/// `rating` and `age_rating` are free text, not numbers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Movie {
    /// Lookup key, expected to be unique among all movies
    pub movie_id: i64,

    pub name: String,

    pub description: String,

    /// Free-text rating (e.g. "9.5" or "10")
    pub rating: String,

    /// Free-text age classification (e.g. "18+")
    pub age_rating: String,

    /// Destination of the redirect
    pub url: String,
}

/// Query parameters for the greeting endpoint
///
/// # Example
/// Query string: `?name=Alice`
///
/// A repeated `name` keeps its last value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GreetingParams {
    /// Name to greet, defaults to "World" when absent
    pub name: Option<String>,
}

impl GreetingParams {
    pub const DEFAULT_NAME: &'static str = "World";

    /// Builds the parameters from decoded query pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let name = pairs
            .into_iter()
            .filter(|(key, _)| key == "name")
            .map(|(_, value)| value)
            .last();
        Self { name }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }
}

/// Body of the greeting endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Greeting {
    #[schema(example = "Hello World!")]
    pub message: String,

    /// Absolute link to the interactive API docs
    #[schema(example = "http://localhost:8080/docs")]
    pub docs: String,
}
