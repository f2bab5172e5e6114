//! Extractors that resolve a path key into a record before the handler runs
//!
//! Handlers that take one of these never see a missing record: an unknown key
//! short-circuits into a 404 and a non-numeric movie id into a 422.

use std::num::IntErrorKind::{NegOverflow, PosOverflow};

use axum::{
    extract::{path::ErrorKind, rejection::PathRejection, FromRequestParts, Path},
    http::{request::Parts, Uri},
};
use percent_encoding::percent_decode_str;

use crate::error::{AppError, ValidationIssue};
use crate::lookup::LookupError;
use crate::model::{Movie, ShortUrl};
use crate::store::AppState;

/// Short URL resolved from the `{slug}` path parameter
#[derive(Debug, Clone)]
pub struct PrefetchedShortUrl(pub ShortUrl);

impl FromRequestParts<AppState> for PrefetchedShortUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let slug = path_param(parts, state).await?;

        match state.store.find_short_url(&slug) {
            Ok(url) => Ok(Self(url.clone())),
            Err(err) => {
                tracing::debug!(%slug, "short url lookup missed");
                Err(err.into())
            }
        }
    }
}

/// Movie resolved from the `{id}` path parameter
#[derive(Debug, Clone)]
pub struct PrefetchedMovie(pub Movie);

impl FromRequestParts<AppState> for PrefetchedMovie {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = path_param(parts, state).await?;

        let result = match parse_movie_id(&raw)? {
            MovieKey::Id(movie_id) => state.store.find_movie(movie_id),
            // No stored id can be this wide
            MovieKey::OutOfRange(digits) => Err(LookupError::MovieNotFound(digits)),
        };

        match result {
            Ok(movie) => Ok(Self(movie.clone())),
            Err(err) => {
                tracing::debug!(input = %raw, "movie lookup missed");
                Err(err.into())
            }
        }
    }
}

/// Reads the single path parameter of the matched route
///
/// Segments whose percent-encoding is not valid UTF-8 are decoded lossily
/// instead of being rejected.
async fn path_param(parts: &mut Parts, state: &AppState) -> Result<String, AppError> {
    let extracted = Path::<String>::from_request_parts(parts, state).await;

    match extracted {
        Ok(Path(value)) => Ok(value),
        Err(PathRejection::FailedToDeserializePathParams(err))
            if matches!(err.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
        {
            Ok(last_segment_lossy(&parts.uri))
        }
        Err(rejection) => Err(rejection.into()),
    }
}

/// Percent-decodes the last non-empty path segment, replacing invalid UTF-8
fn last_segment_lossy(uri: &Uri) -> String {
    let segment = uri.path().rsplit('/').find(|s| !s.is_empty()).unwrap_or("");
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// A movie id as parsed from the path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieKey {
    /// Fits the stored id type
    Id(i64),
    /// A valid integer outside the `i64` range, as canonical decimal digits
    OutOfRange(String),
}

/// Parses a movie id path segment, rejecting anything that is not an integer
///
/// Accepts an optional sign, surrounding whitespace, leading zeros and a
/// fractional part made only of zeros (`301.0`).
pub fn parse_movie_id(raw: &str) -> Result<MovieKey, AppError> {
    let malformed = || {
        tracing::debug!(input = %raw, "movie id is not an integer");
        AppError::MalformedInput(ValidationIssue::int_parsing("id", raw))
    };

    let digits = canonical_integer(raw.trim()).ok_or_else(malformed)?;

    match digits.parse::<i64>() {
        Ok(movie_id) => Ok(MovieKey::Id(movie_id)),
        Err(err) if matches!(err.kind(), PosOverflow | NegOverflow) => {
            Ok(MovieKey::OutOfRange(digits))
        }
        Err(_) => Err(malformed()),
    }
}

/// Normalises `[+-]digits[.zeros]` to `[-]digits` without leading zeros
fn canonical_integer(input: &str) -> Option<String> {
    let (negative, unsigned) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let whole = match unsigned.split_once('.') {
        Some((whole, fraction)) if is_zero_fraction(fraction) => whole,
        Some(_) => return None,
        None => unsigned,
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let trimmed = whole.trim_start_matches('0');
    Some(match (negative, trimmed.is_empty()) {
        (_, true) => "0".to_string(),
        (true, false) => format!("-{trimmed}"),
        (false, false) => trimmed.to_string(),
    })
}

fn is_zero_fraction(fraction: &str) -> bool {
    !fraction.is_empty() && fraction.bytes().all(|b| b == b'0')
}
