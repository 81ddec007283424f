// Lyric decomposition into grapheme clusters.
//
// VCV continuation depends on the terminal sound of the previous lyric, so
// callers only ever need the last unit. Splitting is done on extended
// grapheme clusters, which keeps a base kana and a following combining voicing
// mark (U+3099 / U+309A) together. Small kana written as their own characters
// (ゃ in きゃ) are separate clusters; the vowel table declares them directly.

use unicode_segmentation::UnicodeSegmentation;

/// The last grapheme cluster of `text`, or `None` for empty text.
pub fn terminal_grapheme(text: &str) -> Option<&str> {
    text.graphemes(true).next_back()
}

/// Combining dakuten / handakuten.
pub fn is_combining_voicing_mark(c: char) -> bool {
    matches!(c, '\u{3099}' | '\u{309A}')
}

/// For a cluster made of one base character followed only by combining
/// voicing marks, return the base character.
pub fn strip_voicing_marks(cluster: &str) -> Option<&str> {
    let first = cluster.chars().next()?;
    let (base, marks) = cluster.split_at(first.len_utf8());
    if !marks.is_empty() && marks.chars().all(is_combining_voicing_mark) {
        Some(base)
    } else {
        None
    }
}
