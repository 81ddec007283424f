// Kana vowel classification crate.
//
// Answers "which vowel sound does this lyric end in?" for Japanese VCV
// phonemizers. Used by `vcv_phonemizer` to pick the leading vowel of a VCV
// sample alias from the previous note's lyric.
//
// Architecture:
// - `types.rs`: Core types — `VowelSound`, `VowelCategory`, `VowelDef`
// - `graphemes.rs`: Extended-grapheme decomposition, terminal unit, voicing marks
// - `vowels.rs`: `VowelTable` — built once from definition lines, O(1) lookup;
//   the built-in Japanese table behind `default_table()`
// - `error.rs`: `KanaError` for table construction
//
// Tables are immutable after construction and `Send + Sync`, so one table is
// shared by every phonemizer and thread.

pub mod error;
pub mod graphemes;
pub mod types;
pub mod vowels;

// Re-export key types at crate root for convenience.
pub use error::KanaError;
pub use types::{VowelCategory, VowelDef, VowelSound};
pub use vowels::{JAPANESE_VOWELS, VowelTable, default_table};
