// Errors raised while building a vowel table.
//
// Lookups never fail; only construction does, when the definitions would
// otherwise silently drop or duplicate a grapheme.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KanaError {
    #[error("invalid vowel table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("grapheme '{grapheme}' declared under both '{first}' and '{second}'")]
    DuplicateGrapheme {
        grapheme: String,
        first: String,
        second: String,
    },
    #[error("'{0}' does not name a vowel sound")]
    UnknownVowelSymbol(String),
}
