//! Key lookups over the record lists
//!
//! Both lookups are a linear scan in insertion order. The lists are tiny, so a
//! map index would not buy anything; swapping one in would not change results
//! as long as the first record for a key is the one kept.

use thiserror::Error;

use crate::model::{Movie, ShortUrl};

/// Outcome of a lookup that matched no record
///
/// The `Display` output is the message returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("URL {} not found", quote_key(.0))]
    ShortUrlNotFound(String),

    /// Carries the id as printed, so ids wider than `i64` still report exactly
    #[error("Movie on this id: {0} not found")]
    MovieNotFound(String),
}

/// Returns the first short URL whose slug equals `slug`
pub fn find_by_slug<'a>(
    short_urls: &'a [ShortUrl],
    slug: &str,
) -> Result<&'a ShortUrl, LookupError> {
    short_urls
        .iter()
        .find(|url| url.slug == slug)
        .ok_or_else(|| LookupError::ShortUrlNotFound(slug.to_string()))
}

/// Returns the first movie whose id equals `movie_id`
pub fn find_by_id(movies: &[Movie], movie_id: i64) -> Result<&Movie, LookupError> {
    movies
        .iter()
        .find(|movie| movie.movie_id == movie_id)
        .ok_or_else(|| LookupError::MovieNotFound(movie_id.to_string()))
}

/// Quotes a key for display in error messages
///
/// Uses single quotes unless the key contains a single quote and no double
/// quote. Backslashes, the chosen quote and non-printable characters are
/// escaped as `\xNN`, `\uNNNN` or `\UNNNNNNNN`. Non-printable means control
/// and format characters, separators other than the ASCII space, and private
/// use code points; unassigned code points are left as they are.
pub fn quote_key(key: &str) -> String {
    let quote = if key.contains('\'') && !key.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(key.len() + 2);
    out.push(quote);
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn is_unprintable(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{1f}'
            | '\u{7f}'..='\u{a0}'
            | '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{1680}'
            | '\u{180e}'
            | '\u{2000}'..='\u{200f}'
            | '\u{2028}'..='\u{202f}'
            | '\u{205f}'..='\u{206f}'
            | '\u{3000}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{110bd}'
            | '\u{1bca0}'..='\u{1bca3}'
            | '\u{1d173}'..='\u{1d17a}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
            | '\u{f0000}'..='\u{10ffff}'
    )
}

fn escape_code_point(c: char) -> String {
    match c as u32 {
        cp @ 0..=0xff => format!("\\x{cp:02x}"),
        cp @ 0x100..=0xffff => format!("\\u{cp:04x}"),
        cp => format!("\\U{cp:08x}"),
    }
}
