// Vowel lookup table: grapheme -> declared vowel category.
//
// A table is built once from an ordered list of definition lines, each a
// category symbol plus a comma-separated grapheme list, and is immutable
// afterwards. Construction rejects a grapheme declared twice and symbols
// that name no `VowelSound`; lookups never re-validate.
//
// The built-in Japanese table (`JAPANESE_VOWELS`) covers hiragana and
// katakana, including small kana so that yōon like きゃ resolve through their
// trailing ゃ. It is constructed lazily, exactly once per process, behind
// `default_table()` and shared as an `Arc`.
//
// See also: `graphemes.rs` for how lyrics are decomposed before lookup.

use crate::error::KanaError;
use crate::graphemes::{strip_voicing_marks, terminal_grapheme};
use crate::types::{VowelCategory, VowelDef, VowelSound};
use rustc_hash::FxHashMap;
use std::sync::{Arc, OnceLock};

/// Built-in Japanese definitions, one line per category.
pub const JAPANESE_VOWELS: &[(&str, &str)] = &[
    (
        "a",
        "ぁ,あ,か,が,さ,ざ,た,だ,な,は,ば,ぱ,ま,ゃ,や,ら,わ,ァ,ア,カ,ガ,サ,ザ,タ,ダ,ナ,ハ,バ,パ,マ,ャ,ヤ,ラ,ワ",
    ),
    (
        "e",
        "ぇ,え,け,げ,せ,ぜ,て,で,ね,へ,べ,ぺ,め,れ,ゑ,ェ,エ,ケ,ゲ,セ,ゼ,テ,デ,ネ,ヘ,ベ,ペ,メ,レ,ヱ",
    ),
    (
        "i",
        "ぃ,い,き,ぎ,し,じ,ち,ぢ,に,ひ,び,ぴ,み,り,ゐ,ィ,イ,キ,ギ,シ,ジ,チ,ヂ,ニ,ヒ,ビ,ピ,ミ,リ,ヰ",
    ),
    (
        "o",
        "ぉ,お,こ,ご,そ,ぞ,と,ど,の,ほ,ぼ,ぽ,も,ょ,よ,ろ,を,ォ,オ,コ,ゴ,ソ,ゾ,ト,ド,ノ,ホ,ボ,ポ,モ,ョ,ヨ,ロ,ヲ",
    ),
    ("n", "ん"),
    (
        "u",
        "ぅ,う,く,ぐ,す,ず,つ,づ,ぬ,ふ,ぶ,ぷ,む,ゅ,ゆ,る,ゥ,ウ,ク,グ,ス,ズ,ツ,ヅ,ヌ,フ,ブ,プ,ム,ュ,ユ,ル,ヴ",
    ),
    ("N", "ン"),
];

static DEFAULT_TABLE: OnceLock<Arc<VowelTable>> = OnceLock::new();

/// The built-in Japanese table, built on first use.
///
/// Panics if `JAPANESE_VOWELS` is malformed (covered by tests, so never in a
/// released build).
pub fn default_table() -> Arc<VowelTable> {
    DEFAULT_TABLE
        .get_or_init(|| {
            let table = VowelTable::from_definitions(JAPANESE_VOWELS.iter().copied())
                .expect("built-in Japanese vowel table is malformed");
            Arc::new(table)
        })
        .clone()
}

/// Immutable grapheme -> vowel category mapping.
#[derive(Debug, Clone)]
pub struct VowelTable {
    /// Declared categories, in first-declaration order.
    categories: Vec<VowelCategory>,
    /// Grapheme -> index into `categories`.
    index: FxHashMap<String, usize>,
}

impl VowelTable {
    /// Build a table from `(symbol, "g1,g2,...")` lines.
    ///
    /// Lines repeating a symbol extend the same category. Items are trimmed
    /// and empty items skipped.
    pub fn from_definitions<'a, I>(definitions: I) -> Result<Self, KanaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut categories: Vec<VowelCategory> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        for (symbol, list) in definitions {
            let sound = VowelSound::from_symbol(symbol)
                .ok_or_else(|| KanaError::UnknownVowelSymbol(symbol.to_string()))?;
            let category = match categories.iter().position(|c| c.symbol == symbol) {
                Some(existing) => existing,
                None => {
                    categories.push(VowelCategory {
                        symbol: symbol.to_string(),
                        sound,
                    });
                    categories.len() - 1
                }
            };

            for grapheme in list.split(',').map(str::trim).filter(|g| !g.is_empty()) {
                if let Some(&previous) = index.get(grapheme) {
                    return Err(KanaError::DuplicateGrapheme {
                        grapheme: grapheme.to_string(),
                        first: categories[previous].symbol.clone(),
                        second: symbol.to_string(),
                    });
                }
                index.insert(grapheme.to_string(), category);
            }
        }

        Ok(VowelTable { categories, index })
    }

    /// Parse a table from a JSON array of `{"symbol", "graphemes"}` objects.
    pub fn from_json(json: &str) -> Result<Self, KanaError> {
        let defs: Vec<VowelDef> = serde_json::from_str(json)?;
        Self::from_definitions(
            defs.iter()
                .map(|d| (d.symbol.as_str(), d.graphemes.as_str())),
        )
    }

    /// Category a single grapheme was declared under.
    pub fn lookup(&self, grapheme: &str) -> Option<&VowelCategory> {
        self.index.get(grapheme).map(|&i| &self.categories[i])
    }

    /// Category of the terminal grapheme of `text`.
    ///
    /// Falls back to the base kana when the terminal cluster carries
    /// combining voicing marks the table does not declare; voicing never
    /// changes the vowel.
    pub fn lookup_terminal(&self, text: &str) -> Option<&VowelCategory> {
        let last = terminal_grapheme(text)?;
        self.lookup(last)
            .or_else(|| strip_voicing_marks(last).and_then(|base| self.lookup(base)))
    }

    /// Declared categories, in first-declaration order.
    pub fn categories(&self) -> &[VowelCategory] {
        &self.categories
    }

    /// Number of declared graphemes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_grapheme_maps_to_its_category() {
        let table = default_table();
        for (symbol, list) in JAPANESE_VOWELS {
            for grapheme in list.split(',') {
                let category = table
                    .lookup(grapheme)
                    .unwrap_or_else(|| panic!("'{grapheme}' missing from table"));
                assert_eq!(category.symbol, *symbol, "wrong category for '{grapheme}'");
            }
        }
    }

    #[test]
    fn test_default_table_size() {
        let expected: usize = JAPANESE_VOWELS
            .iter()
            .map(|(_, list)| list.split(',').count())
            .sum();
        assert_eq!(default_table().len(), expected);
        assert_eq!(default_table().categories().len(), 7);
    }

    #[test]
    fn test_default_table_is_shared() {
        assert!(Arc::ptr_eq(&default_table(), &default_table()));
    }

    #[test]
    fn test_undeclared_graphemes_are_none() {
        let table = default_table();
        assert!(table.lookup("、").is_none());
        assert!(table.lookup("っ").is_none());
        assert!(table.lookup("").is_none());
        assert!(table.lookup("a").is_none());
        assert!(table.lookup("R").is_none());
    }

    #[test]
    fn test_nasal_symbols_kept_verbatim() {
        let table = default_table();
        let hira = table.lookup("ん").unwrap();
        let kata = table.lookup("ン").unwrap();
        assert_eq!(hira.symbol, "n");
        assert_eq!(kata.symbol, "N");
        assert_eq!(hira.sound, VowelSound::N);
        assert_eq!(kata.sound, VowelSound::N);
    }

    #[test]
    fn test_lookup_terminal() {
        let table = default_table();
        assert_eq!(table.lookup_terminal("さくら").unwrap().symbol, "a");
        assert_eq!(table.lookup_terminal("きゃ").unwrap().symbol, "a");
        assert_eq!(table.lookup_terminal("きょ").unwrap().symbol, "o");
        assert_eq!(table.lookup_terminal("ヴ").unwrap().sound, VowelSound::U);
        assert!(table.lookup_terminal("").is_none());
        assert!(table.lookup_terminal("あ、").is_none());
        assert!(table.lookup_terminal("R").is_none());
    }

    #[test]
    fn test_lookup_terminal_combining_voicing_mark() {
        let table = default_table();
        // Decomposed が and ぴ.
        assert_eq!(table.lookup_terminal("か\u{3099}").unwrap().symbol, "a");
        assert_eq!(table.lookup_terminal("ひ\u{309A}").unwrap().symbol, "i");
    }

    #[test]
    fn test_duplicate_grapheme_rejected() {
        let err = VowelTable::from_definitions([("a", "あ,か"), ("i", "い,か")]).unwrap_err();
        match err {
            KanaError::DuplicateGrapheme {
                grapheme,
                first,
                second,
            } => {
                assert_eq!(grapheme, "か");
                assert_eq!(first, "a");
                assert_eq!(second, "i");
            }
            other => panic!("expected DuplicateGrapheme, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let err = VowelTable::from_definitions([("x", "あ")]).unwrap_err();
        assert!(matches!(err, KanaError::UnknownVowelSymbol(s) if s == "x"));
    }

    #[test]
    fn test_repeated_symbol_extends_category() {
        let table = VowelTable::from_definitions([("a", "あ"), ("a", " か ,")]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.categories().len(), 1);
        assert_eq!(table.lookup("か").unwrap().symbol, "a");
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"symbol": "a", "graphemes": "あ,か"},
            {"symbol": "n", "graphemes": "ん"}
        ]"#;
        let table = VowelTable::from_json(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("ん").unwrap().sound, VowelSound::N);
        assert!(table.lookup("さ").is_none());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            VowelTable::from_json("{not json"),
            Err(KanaError::Json(_))
        ));
    }
}
