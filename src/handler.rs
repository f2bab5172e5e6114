//! HTTP request handlers for the URL shortener API
//!
//! This module implements the request side of the service:
//! - A greeting endpoint that also links to the API docs
//! - Listing, viewing and following short URLs
//! - Listing, viewing and following movie links
//!
//! Detail and redirect handlers receive records already resolved by the
//! extractors in [`crate::extract`], so they only decide how to respond.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, Uri},
    response::Redirect,
    Json,
};
use url::Url;

use crate::error::{AppError, ErrorDetail, ValidationErrorBody};
use crate::extract::{PrefetchedMovie, PrefetchedShortUrl};
use crate::model::{Greeting, GreetingParams, Movie, ShortUrl};
use crate::store::AppState;

/// Greets the caller and points at the API docs
///
/// The query is read as raw pairs so a repeated `name` keeps its last value
/// instead of failing.
#[utoipa::path(
    get,
    path = "/",
    tag = "greeting",
    params(
        ("name" = Option<String>, Query, description = "Who to greet", example = "Alice")
    ),
    responses(
        (status = 200, description = "Greeting with a docs link", body = Greeting),
        (status = 422, description = "Undecodable query string", body = ValidationErrorBody)
    )
)]
pub async fn read_root(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Json<Greeting>, AppError> {
    let Query(pairs) = query?;
    let params = GreetingParams::from_pairs(pairs);

    Ok(Json(Greeting {
        message: format!("Hello {}!", params.name()),
        docs: docs_url(&uri, &headers),
    }))
}

/// Builds the docs link from the request's own address
///
/// The absolute request URL is rebuilt from the URI (when it carries a scheme
/// and authority) or from the `X-Forwarded-Proto` and `Host` headers, then its
/// path is replaced with `/docs` and its query dropped.
pub fn docs_url(uri: &Uri, headers: &HeaderMap) -> String {
    let scheme = uri
        .scheme_str()
        .or_else(|| header_str(headers, "x-forwarded-proto"))
        .unwrap_or("http");
    let authority = uri
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| header_str(headers, header::HOST.as_str()))
        .unwrap_or("localhost");
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    match Url::parse(&format!("{scheme}://{authority}{path}")) {
        Ok(mut url) => {
            url.set_path("/docs");
            url.set_query(None);
            url.set_fragment(None);
            url.into()
        }
        Err(err) => {
            tracing::warn!(%authority, error = %err, "could not rebuild request url");
            "/docs".to_string()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Lists every short URL in insertion order
#[utoipa::path(
    get,
    path = "/short-urls/",
    tag = "short-urls",
    responses((status = 200, description = "All short URLs", body = Vec<ShortUrl>))
)]
pub async fn list_short_urls(State(state): State<AppState>) -> Json<Vec<ShortUrl>> {
    Json(state.store.short_urls().to_vec())
}

/// Returns the short URL matching the `{slug}` path parameter
///
/// # Response
///
/// - **200 OK** - `{"slug": "...", "target_url": "..."}`
/// - **404 Not Found** - `{"detail": "URL 'slug' not found"}`
#[utoipa::path(
    get,
    path = "/short-urls/{slug}/",
    tag = "short-urls",
    params(("slug" = String, Path, description = "Short URL slug")),
    responses(
        (status = 200, description = "Short URL found", body = ShortUrl),
        (status = 404, description = "No short URL with this slug", body = ErrorDetail)
    )
)]
pub async fn read_short_url(PrefetchedShortUrl(url): PrefetchedShortUrl) -> Json<ShortUrl> {
    Json(url)
}

/// Redirects a slug to its target URL
///
/// # Response
///
/// - **307 Temporary Redirect** - `Location` is the record's `target_url`
/// - **404 Not Found** - Slug does not exist
///
/// Also served with a trailing slash.
#[utoipa::path(
    get,
    path = "/r/{slug}",
    tag = "short-urls",
    params(("slug" = String, Path, description = "Short URL slug")),
    responses(
        (status = 307, description = "Redirect to the target URL"),
        (status = 404, description = "No short URL with this slug", body = ErrorDetail)
    )
)]
pub async fn redirect_short_url(PrefetchedShortUrl(url): PrefetchedShortUrl) -> Redirect {
    tracing::debug!(slug = %url.slug, target = %url.target_url, "redirecting short url");
    Redirect::temporary(&url.target_url)
}

/// Lists every movie in insertion order
#[utoipa::path(
    get,
    path = "/movies/",
    tag = "movies",
    responses((status = 200, description = "All movies", body = Vec<Movie>))
)]
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.store.movies().to_vec())
}

/// Returns the movie matching the `{id}` path parameter
///
/// # Response
///
/// - **200 OK** - The movie record
/// - **404 Not Found** - `{"detail": "Movie on this id: 999 not found"}`
/// - **422 Unprocessable Entity** - `id` is not an integer
#[utoipa::path(
    get,
    path = "/movie/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie found", body = Movie),
        (status = 404, description = "No movie with this id", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ValidationErrorBody)
    )
)]
pub async fn read_movie(PrefetchedMovie(movie): PrefetchedMovie) -> Json<Movie> {
    Json(movie)
}

/// Redirects a movie id to the movie's page
///
/// Also served with a trailing slash.
#[utoipa::path(
    get,
    path = "/r/movie/{id}",
    tag = "movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 307, description = "Redirect to the movie's page"),
        (status = 404, description = "No movie with this id", body = ErrorDetail),
        (status = 422, description = "Id is not an integer", body = ValidationErrorBody)
    )
)]
pub async fn redirect_movie(PrefetchedMovie(movie): PrefetchedMovie) -> Redirect {
    tracing::debug!(movie_id = movie.movie_id, target = %movie.url, "redirecting movie");
    Redirect::temporary(&movie.url)
}

/// Redirects `/path` to `/path/`, keeping the query string
pub async fn append_trailing_slash(uri: Uri) -> Redirect {
    Redirect::temporary(&with_path(&uri, &format!("{}/", uri.path())))
}

/// Redirects `/path/` to `/path`, keeping the query string
pub async fn trim_trailing_slash(uri: Uri) -> Redirect {
    let path = uri.path().trim_end_matches('/');
    Redirect::temporary(&with_path(&uri, if path.is_empty() { "/" } else { path }))
}

fn with_path(uri: &Uri, path: &str) -> String {
    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

/// Fallback for requests that match no route
pub async fn route_not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route matched");
    AppError::RouteNotFound
}
