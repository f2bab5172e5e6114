//! HTTP error responses
//!
//! Every error leaves the service as a JSON object with a `detail` field.
//! Lookup misses carry a message, malformed path or query parameters carry a
//! list of validation entries.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::lookup::LookupError;

/// Body of 404 responses
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ErrorDetail {
    /// Human-readable message, embedding the missing key for lookups
    #[schema(example = "URL 'missing' not found")]
    pub detail: String,
}

/// Body of 422 responses
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ValidationErrorBody {
    pub detail: Vec<ValidationIssue>,
}

/// One entry of a 422 response body
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: String,
}

impl ValidationIssue {
    /// Issue for a path parameter that should have been an integer
    pub fn int_parsing(param: &str, input: impl Into<String>) -> Self {
        Self {
            kind: "int_parsing".to_string(),
            loc: vec!["path".to_string(), param.to_string()],
            msg: "Input should be a valid integer, unable to parse string as an integer"
                .to_string(),
            input: input.into(),
        }
    }

    /// Issue for a path that could not be extracted at all
    pub fn path(msg: impl Into<String>) -> Self {
        Self {
            kind: "path_error".to_string(),
            loc: vec!["path".to_string()],
            msg: msg.into(),
            input: String::new(),
        }
    }

    /// Issue for a query string that could not be decoded
    pub fn query(msg: impl Into<String>) -> Self {
        Self {
            kind: "query_error".to_string(),
            loc: vec!["query".to_string()],
            msg: msg.into(),
            input: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    /// A lookup key matched no record
    NotFound(LookupError),
    /// A path or query parameter failed type coercion
    MalformedInput(ValidationIssue),
    /// No route matched the request
    RouteNotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MalformedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        AppError::NotFound(err)
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedInput(ValidationIssue::path(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedInput(ValidationIssue::query(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound(err) => {
                let body = ErrorDetail {
                    detail: err.to_string(),
                };
                (status, Json(body)).into_response()
            }
            AppError::MalformedInput(issue) => {
                let body = ValidationErrorBody {
                    detail: vec![issue],
                };
                (status, Json(body)).into_response()
            }
            AppError::RouteNotFound => {
                let body = ErrorDetail {
                    detail: "Not Found".to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
