// Core kana vowel types: vowel sounds and the categories a vowel table declares.
//
// A `VowelSound` is the closed set of terminal sounds a Japanese mora can end
// in: the five oral vowels plus the moraic nasal. A `VowelCategory` is what a
// table actually declares: the symbol written into VCV sample aliases
// together with the sound it stands for. The symbol is kept verbatim because
// voicebanks differ in how they spell the nasal (the built-in table uses `n`
// for hiragana ん and `N` for katakana ン, both `VowelSound::N`).
//
// The type hierarchy is:
// - `VowelSound` — a, i, u, e, o, n
// - `VowelCategory` — declared symbol + sound, the result of a table lookup
// - `VowelDef` — one JSON-loadable definition line (symbol + grapheme list)

use serde::{Deserialize, Serialize};

/// Terminal sound of a mora.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelSound {
    A,
    I,
    U,
    E,
    O,
    /// Moraic nasal (ん / ン).
    N,
}

impl VowelSound {
    /// Canonical lowercase symbol for this sound.
    pub fn symbol(self) -> &'static str {
        match self {
            VowelSound::A => "a",
            VowelSound::I => "i",
            VowelSound::U => "u",
            VowelSound::E => "e",
            VowelSound::O => "o",
            VowelSound::N => "n",
        }
    }

    /// Parse a declared category symbol. Case-insensitive, so `N` and `n`
    /// both name the nasal.
    pub fn from_symbol(symbol: &str) -> Option<VowelSound> {
        match symbol.to_ascii_lowercase().as_str() {
            "a" => Some(VowelSound::A),
            "i" => Some(VowelSound::I),
            "u" => Some(VowelSound::U),
            "e" => Some(VowelSound::E),
            "o" => Some(VowelSound::O),
            "n" => Some(VowelSound::N),
            _ => None,
        }
    }
}

/// A category as declared by a vowel table: the symbol used in sample
/// aliases plus the sound it denotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VowelCategory {
    /// Symbol exactly as declared (e.g. "a", "N").
    pub symbol: String,
    pub sound: VowelSound,
}

/// One definition line as stored in JSON: `{"symbol": "a", "graphemes": "あ,か"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VowelDef {
    pub symbol: String,
    /// Comma-separated grapheme list.
    pub graphemes: String,
}
