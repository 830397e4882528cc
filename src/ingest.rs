//! Tokenization and normalization of raw text.
//!
//! Lines are split on ASCII whitespace, vertical tab included. Each token
//! loses any run of [`PUNCTUATION`] at either end and is lowercased (ASCII
//! letters only). Tokens that end up empty are dropped; punctuation inside a
//! token, such as the hyphen in `well-known` or the apostrophe in `don't`, is
//! kept.
//!
//! ```
//! use wordtable::ingest::{normalize, words};
//!
//! assert_eq!(normalize("“Hello,”").as_deref(), Some("hello"));
//! assert_eq!(normalize("...").as_deref(), None);
//!
//! let line: Vec<String> = words("Hello, world! Hello...").collect();
//! assert_eq!(line, ["hello", "world", "hello"]);
//! ```

/// Characters stripped from both ends of every token.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', '"', '\'', '“', '”', '‘', '’'];

/// Returns `true` for the bytes that separate tokens: space, `\t`, `\n`,
/// `\x0B`, `\x0C` and `\r`.
#[inline]
pub fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0B'
}

/// Splits `line` into raw whitespace-delimited tokens.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_separator).filter(|token| !token.is_empty())
}

/// Strips edge punctuation and lowercases; `None` if nothing remains.
pub fn normalize(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(PUNCTUATION);
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

/// Normalized, non-empty words of `line`, in order.
pub fn words(line: &str) -> impl Iterator<Item = String> + '_ {
    tokens(line).filter_map(normalize)
}
