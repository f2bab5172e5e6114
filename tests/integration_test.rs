//! Integration tests for the URL shortener API
//!
//! These tests verify the entire application stack including:
//! - HTTP routing
//! - Record prefetching and redirects
//! - Error responses

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// Import from the main crate
use url_shortener::model::{Movie, ShortUrl};
use url_shortener::route::create_app;
use url_shortener::store::{AppState, RecordStore};

/// Helper function to create a test application with the seeded records
fn setup_test_app() -> axum::Router {
    create_app(AppState::new(RecordStore::seeded()))
}

/// Sends a GET request for `uri` to a fresh application
async fn get(uri: &str) -> Response {
    setup_test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header("host", "testserver")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Helper function to parse response body as JSON
async fn response_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&bytes).expect("Failed to parse JSON")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get("location")
        .expect("missing location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_root_default_greeting() {
    let response = get("/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({"message": "Hello World!", "docs": "http://testserver/docs"})
    );
}

#[tokio::test]
async fn test_root_named_greeting() {
    let response = get("/?name=Alice").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Hello Alice!");
    assert_eq!(body["docs"], "http://testserver/docs");
}

#[tokio::test]
async fn test_list_short_urls() {
    let response = get("/short-urls/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!([
            {"slug": "example", "target_url": "https://example.com/"},
            {"slug": "search", "target_url": "https://google.com/"}
        ])
    );
}

#[tokio::test]
async fn test_short_url_detail() {
    let response = get("/short-urls/example/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({"slug": "example", "target_url": "https://example.com/"})
    );
}

#[tokio::test]
async fn test_short_url_detail_not_found() {
    let response = get("/short-urls/missing/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "URL 'missing' not found"}));
}

#[tokio::test]
async fn test_redirect_short_url() {
    for uri in ["/r/search", "/r/search/"] {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "https://google.com/");
    }
}

#[tokio::test]
async fn test_redirect_short_url_not_found() {
    for uri in ["/r/nope", "/r/nope/"] {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response_json(response.into_body()).await;
        assert_eq!(body, json!({"detail": "URL 'nope' not found"}));
    }
}

#[tokio::test]
async fn test_percent_encoded_slug_is_decoded_in_message() {
    let response = get("/short-urls/it's/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "URL \"it's\" not found"}));

    let response = get("/r/two%20words").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "URL 'two words' not found"}));
}

#[tokio::test]
async fn test_list_movies() {
    let response = get("/movies/").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    let movies: Vec<Movie> = serde_json::from_value(body).unwrap();
    assert_eq!(movies, RecordStore::seeded().movies());
}

#[tokio::test]
async fn test_movie_detail() {
    let response = get("/movie/301").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "movie_id": 301,
            "name": "Matrix",
            "description": "some desc",
            "rating": "9.5",
            "age_rating": "18+",
            "url": "https://www.kinopoisk.ru/film/301/"
        })
    );
}

#[tokio::test]
async fn test_movie_detail_not_found() {
    let response = get("/movie/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "Movie on this id: 999 not found"}));
}

#[tokio::test]
async fn test_movie_detail_rejects_non_integer_id() {
    let response = get("/movie/abc").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["detail"][0]["type"], "int_parsing");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "id"]));
    assert_eq!(body["detail"][0]["input"], "abc");
}

#[tokio::test]
async fn test_redirect_movie() {
    for uri in ["/r/movie/328", "/r/movie/328/"] {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "https://www.kinopoisk.ru/film/328/");
    }
}

#[tokio::test]
async fn test_redirect_movie_not_found() {
    let response = get("/r/movie/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "Movie on this id: 999 not found"}));
}

#[tokio::test]
async fn test_redirect_movie_rejects_non_integer_id() {
    let response = get("/r/movie/1.5/").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_trailing_slash_redirects() {
    let cases = [
        ("/short-urls", "/short-urls/"),
        ("/short-urls/example", "/short-urls/example/"),
        ("/movies?x=1", "/movies/?x=1"),
        ("/movie/301/", "/movie/301"),
    ];

    for (uri, expected) in cases {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
        assert_eq!(location(&response), expected);
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let response = get("/nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let app = setup_test_app();

    let mut bodies = Vec::new();
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/short-urls/search/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(response_json(response.into_body()).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_duplicate_slugs_resolve_to_first_record() {
    let store = RecordStore::new(
        vec![
            ShortUrl::new("dup", "https://first.test/"),
            ShortUrl::new("dup", "https://second.test/"),
        ],
        Vec::new(),
    );
    let app = create_app(AppState::new(store));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/r/dup")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "https://first.test/");
}

#[tokio::test]
async fn test_root_repeated_name_keeps_last_value() {
    let response = get("/?name=a&name=b").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["message"], "Hello b!");
}

#[tokio::test]
async fn test_docs_link_from_root_is_served() {
    let response = get("/").await;
    let body = response_json(response.into_body()).await;

    let docs = url::Url::parse(body["docs"].as_str().unwrap()).unwrap();
    let response = get(docs.path()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = get("/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["info"]["title"], "URL Shortener");
    assert!(body["paths"]["/short-urls/{slug}/"]["get"].is_object());
    assert!(body["paths"]["/r/movie/{id}"]["get"].is_object());

    let response = get("/redoc").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_movie_id_wider_than_i64_is_not_found() {
    for uri in [
        "/movie/99999999999999999999",
        "/r/movie/99999999999999999999",
        "/r/movie/99999999999999999999/",
    ] {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let body = response_json(response.into_body()).await;
        assert_eq!(
            body,
            json!({"detail": "Movie on this id: 99999999999999999999 not found"})
        );
    }
}

#[tokio::test]
async fn test_movie_id_with_zero_fraction() {
    let response = get("/movie/301.0").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response.into_body()).await;
    assert_eq!(body["name"], "Matrix");

    let response = get("/r/movie/0328.00").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "https://www.kinopoisk.ru/film/328/");
}

#[tokio::test]
async fn test_unprintable_slug_is_escaped_in_message() {
    let response = get("/short-urls/a%E2%80%8Bb/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response.into_body()).await;
    assert_eq!(body, json!({"detail": "URL 'a\\u200bb' not found"}));
}

#[tokio::test]
async fn test_invalid_utf8_slug_is_not_found() {
    for uri in ["/short-urls/%FF/", "/r/%FF"] {
        let response = get(uri).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");

        let body = response_json(response.into_body()).await;
        assert_eq!(body, json!({"detail": "URL '\u{fffd}' not found"}));
    }
}
