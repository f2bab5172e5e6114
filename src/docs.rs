//! OpenAPI document and interactive API docs
//!
//! `/openapi.json` serves the generated document; `/docs` (Swagger UI) and
//! `/redoc` are static pages that load their assets from a CDN and render
//! that document.

use axum::{response::Html, Json};
use utoipa::OpenApi;

use crate::error::{ErrorDetail, ValidationErrorBody, ValidationIssue};
use crate::handler;
use crate::model::{Greeting, Movie, ShortUrl};

pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "URL Shortener"),
    paths(
        handler::read_root,
        handler::list_short_urls,
        handler::read_short_url,
        handler::redirect_short_url,
        handler::list_movies,
        handler::read_movie,
        handler::redirect_movie,
    ),
    components(schemas(
        ShortUrl,
        Movie,
        Greeting,
        ErrorDetail,
        ValidationErrorBody,
        ValidationIssue
    )),
    tags(
        (name = "greeting", description = "Greeting and docs link"),
        (name = "short-urls", description = "Short URL lookup and redirects"),
        (name = "movies", description = "Movie lookup and redirects")
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Serves the Swagger UI page
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet"
    href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
<title>URL Shortener - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{OPENAPI_PATH}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    showExtensions: true,
    showCommonExtensions: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
}})
</script>
</body>
</html>
"#
    ))
}

/// Serves the ReDoc page
pub async fn redoc() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>URL Shortener - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>body {{ margin: 0; padding: 0; }}</style>
</head>
<body>
<redoc spec-url="{OPENAPI_PATH}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#
    ))
}
