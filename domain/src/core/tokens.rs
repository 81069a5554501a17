//! Token estimation.
//!
//! Providers report exact usage when they can; everywhere else the sandbox
//! falls back to a character-based estimate of roughly four characters per
//! token, which is close enough for display and for capping message size.

/// Approximate characters per token.
pub const CHARS_PER_TOKEN: usize = 4;

/// Suffix appended to text cut by [`truncate_to_token_limit`].
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Estimate the number of tokens in `text`.
///
/// Counts characters (not bytes) and rounds up, so any non-empty text is at
/// least one token.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Truncate `text` to approximately `limit` tokens.
///
/// Text already within the limit is returned unchanged. Otherwise the text is
/// cut to `limit * CHARS_PER_TOKEN` characters and [`TRUNCATION_MARKER`] is
/// appended.
pub fn truncate_to_token_limit(text: &str, limit: usize) -> String {
    if estimate_tokens(text) <= limit {
        return text.to_string();
    }
    let max_chars = limit * CHARS_PER_TOKEN;
    let end = text
        .char_indices()
        .nth(max_chars)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    format!("{}{}", &text[..end], TRUNCATION_MARKER)
}
