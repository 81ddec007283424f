// Loading errors for singers, songs, and custom vowel tables.
//
// Resolution itself never fails; everything here comes from reading host-side
// data before the first `resolve` call.

use thiserror::Error;
use vcv_kana::KanaError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tone name '{0}'")]
    InvalidToneName(String),
    #[error("invalid vowel table: {0}")]
    Vowels(#[from] KanaError),
}
