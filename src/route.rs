//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.
//! It creates the Axum router with the application state.

use axum::routing::get;
use axum::Router;

use crate::docs::{openapi_json, redoc, swagger_ui, OPENAPI_PATH};
use crate::handler::{
    append_trailing_slash, list_movies, list_short_urls, read_movie, read_root,
    read_short_url, redirect_movie, redirect_short_url, route_not_found, trim_trailing_slash,
};
use crate::store::AppState;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `GET /` - Greeting with a link to the docs
/// - `GET /short-urls/` - Lists all short URLs
/// - `GET /short-urls/{slug}/` - Shows one short URL
/// - `GET /r/{slug}` and `/r/{slug}/` - Redirects to the short URL's target
/// - `GET /movies/` - Lists all movies
/// - `GET /movie/{id}` - Shows one movie
/// - `GET /r/movie/{id}` and `/r/movie/{id}/` - Redirects to the movie's page
/// - `GET /openapi.json` - OpenAPI document for the routes above
/// - `GET /docs` and `/redoc` - Interactive API docs
///
/// The other slash variant of `/short-urls/`, `/short-urls/{slug}/`, `/movies/`
/// and `/movie/{id}` redirects to the registered one. Anything else is a 404.
///
/// # Example Usage
///
/// ```no_run
/// # use url_shortener::store::{AppState, RecordStore};
/// # use url_shortener::route::create_app;
/// let state = AppState::new(RecordStore::seeded());
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let short_url_routes = Router::new()
        .route("/short-urls/", get(list_short_urls))
        .route("/short-urls", get(append_trailing_slash))
        .route("/short-urls/{slug}/", get(read_short_url))
        .route("/short-urls/{slug}", get(append_trailing_slash))
        .route("/r/{slug}", get(redirect_short_url))
        .route("/r/{slug}/", get(redirect_short_url));

    let movie_routes = Router::new()
        .route("/movies/", get(list_movies))
        .route("/movies", get(append_trailing_slash))
        .route("/movie/{id}", get(read_movie))
        .route("/movie/{id}/", get(trim_trailing_slash))
        .route("/r/movie/{id}", get(redirect_movie))
        .route("/r/movie/{id}/", get(redirect_movie));

    let docs_routes = Router::new()
        .route(OPENAPI_PATH, get(openapi_json))
        .route("/docs", get(swagger_ui))
        .route("/redoc", get(redoc));

    Router::new()
        .route("/", get(read_root))
        .merge(docs_routes)
        .merge(short_url_routes)
        .merge(movie_routes)
        .fallback(route_not_found)
        // Inject the application state into all handlers
        .with_state(state)
}
