//! Lenient parsers for GitHub Actions inputs
//!
//! Action inputs arrive as strings (often empty when unset), so these
//! parsers fall back to defaults instead of rejecting odd values.

use conflict_labeler::run::DEFAULT_CONFLICT_COMMENT;

/// Default delay between mergeability polls
pub const DEFAULT_WAIT_MS: u64 = 5000;

/// Parse `max_retries`; anything that is not a positive integer becomes 1
#[allow(clippy::unnecessary_wraps)]
pub fn parse_max_retries(value: &str) -> Result<u32, String> {
    Ok(value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(1))
}

/// Parse `wait_ms`; blank means the default
pub fn parse_wait_ms(value: &str) -> Result<u64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_WAIT_MS);
    }
    value
        .parse()
        .map_err(|_| format!("wait_ms must be a number of milliseconds, got '{value}'"))
}

/// Parse a boolean input; only `true` (any case) enables it
#[allow(clippy::unnecessary_wraps)]
pub fn parse_bool_input(value: &str) -> Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

/// Interpret the `comment` input
///
/// Blank or `false` disables comments, `true` uses the default body, and
/// anything else is used verbatim as the comment body.
pub fn comment_body(value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    if value.eq_ignore_ascii_case("false") {
        None
    } else if value.eq_ignore_ascii_case("true") {
        Some(DEFAULT_CONFLICT_COMMENT.to_string())
    } else {
        Some(value.to_string())
    }
}
