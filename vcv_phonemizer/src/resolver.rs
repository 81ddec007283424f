// Per-note VCV phoneme resolution.
//
// Given a note, its previous and next neighbours, a vowel table, and a
// voicebank, pick the sample alias to play. In order of precedence:
//
// 1. A non-empty phonetic hint on the note is returned verbatim.
// 2. The lyric is normalized by the first alias set that claims it.
// 3. The default identifier is "- <lyric>" (phrase start).
// 4. If there is a previous neighbour, the vowel of its terminal grapheme
//    replaces "-", giving "<vowel> <lyric>". Its effective lyric is its hint
//    when present (used as-is), otherwise its lyric normalized by the same
//    first-claim scan.
// 5. The claiming alias set, if any, re-decorates the identifier.
// 6. If the voicebank has no sample for the identifier at the note's tone,
//    the raw lyric is returned instead.
//
// The next neighbour is accepted but unused.
//
// Resolution is pure: it only reads the table and voicebank, and identical
// inputs always produce the identical phoneme.

use crate::note::{Note, Phoneme};
use crate::voicebank::{OtoAliasSet, Voicebank, claim_lyric};
use std::borrow::Cow;
use tracing::{debug, trace};
use vcv_kana::{VowelCategory, VowelTable};

/// Leading symbol of a phrase-initial (CV) alias.
pub const PHRASE_START: &str = "-";

/// Resolve the phoneme for `current`.
pub fn resolve<V>(
    table: &VowelTable,
    current: &Note,
    prev: Option<&Note>,
    _next: Option<&Note>,
    voicebank: &V,
) -> Phoneme
where
    V: Voicebank + ?Sized,
{
    if let Some(hint) = current.hint() {
        return Phoneme::new(hint);
    }

    let claimed = claim_lyric(voicebank, &current.lyric);
    let lyric = claimed
        .as_ref()
        .map_or(current.lyric.as_str(), |(_, stripped)| stripped.as_str());

    let vowel = prev.and_then(|prev| trailing_vowel(table, prev, voicebank));
    let lead = vowel.map_or(PHRASE_START, |category| category.symbol.as_str());
    let mut candidate = format!("{lead} {lyric}");

    if let Some((set, _)) = &claimed {
        candidate = set.decorate(&candidate);
    }

    if voicebank.has_mapped_sample(&candidate, current.tone) {
        trace!(
            lyric = %current.lyric,
            phoneme = %candidate,
            vowel = vowel.map(|category| category.sound.symbol()),
            "resolved"
        );
        Phoneme::new(candidate)
    } else {
        debug!(
            lyric = %current.lyric,
            candidate = %candidate,
            tone = current.tone,
            "no mapped sample, falling back to lyric"
        );
        Phoneme::new(current.lyric.as_str())
    }
}

/// Vowel category the previous note ends in, if any.
fn trailing_vowel<'t, V>(
    table: &'t VowelTable,
    prev: &Note,
    voicebank: &V,
) -> Option<&'t VowelCategory>
where
    V: Voicebank + ?Sized,
{
    let effective: Cow<'_, str> = match prev.hint() {
        Some(hint) => Cow::Borrowed(hint),
        None => match claim_lyric(voicebank, &prev.lyric) {
            Some((_, stripped)) => Cow::Owned(stripped),
            None => Cow::Borrowed(prev.lyric.as_str()),
        },
    };
    table.lookup_terminal(&effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::singer::{PrefixSuffixSet, Singer, Subbank};
    use crate::voicebank::EmptyVoicebank;
    use vcv_kana::default_table;

    fn singer(aliases: &[&str]) -> Singer {
        Singer::new("test").with_aliases(aliases.iter().copied())
    }

    #[test]
    fn test_vcv_from_previous_vowel() {
        let table = default_table();
        let bank = singer(&["a か"]);
        let prev = Note::new("あ", 60);
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "a か");
    }

    #[test]
    fn test_missing_sample_falls_back_to_lyric() {
        let table = default_table();
        let bank = singer(&["- か"]);
        let prev = Note::new("あ", 60);
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "か");
    }

    #[test]
    fn test_no_previous_uses_phrase_start() {
        let table = default_table();
        let bank = singer(&["- か", "a か"]);
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, None, None, &bank).phoneme, "- か");
    }

    #[test]
    fn test_hint_short_circuits() {
        let table = default_table();
        let bank = singer(&["a か"]);
        let prev = Note::new("あ", 60);
        let cur = Note::new("か", 60).with_hint("ka_custom");
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "ka_custom");
        assert_eq!(resolve(&table, &cur, None, None, &EmptyVoicebank).phoneme, "ka_custom");
    }

    #[test]
    fn test_empty_hint_is_not_an_override() {
        let table = default_table();
        let bank = singer(&["- か"]);
        let cur = Note::new("か", 60).with_hint("");
        assert_eq!(resolve(&table, &cur, None, None, &bank).phoneme, "- か");
    }

    #[test]
    fn test_unrecognized_previous_grapheme_keeps_phrase_start() {
        let table = default_table();
        let bank = singer(&["- か", "a か"]);
        let cur = Note::new("か", 60);
        for lyric in ["、", "R", "", "っ"] {
            let prev = Note::new(lyric, 60);
            assert_eq!(
                resolve(&table, &cur, Some(&prev), None, &bank).phoneme,
                "- か",
                "prev lyric '{lyric}'"
            );
        }
    }

    #[test]
    fn test_previous_hint_terminal_is_used() {
        let table = default_table();
        let bank = singer(&["a か", "o か"]);
        let prev = Note::new("あ", 60).with_hint("- こ");
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "o か");
    }

    #[test]
    fn test_previous_hint_is_not_alias_stripped() {
        let table = default_table();
        // "こ強" as a hint ends in 強, which is no kana: no continuation.
        let bank = Singer::new("test")
            .with_alias_set(PrefixSuffixSet::new("power", "", "強"))
            .with_aliases(["- か", "o か"]);
        let prev = Note::new("あ", 60).with_hint("こ強");
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "- か");
    }

    #[test]
    fn test_previous_lyric_is_alias_stripped() {
        let table = default_table();
        let bank = Singer::new("test")
            .with_alias_set(PrefixSuffixSet::new("power", "", "強"))
            .with_aliases(["o か"]);
        let prev = Note::new("こ強", 60);
        let cur = Note::new("か", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "o か");
    }

    #[test]
    fn test_claimed_lyric_is_redecorated() {
        let table = default_table();
        let bank = Singer::new("test")
            .with_alias_set(PrefixSuffixSet::new("power", "", "強"))
            .with_aliases(["a か強"]);
        let prev = Note::new("さ", 60);
        let cur = Note::new("か強", 60);
        assert_eq!(resolve(&table, &cur, Some(&prev), None, &bank).phoneme, "a か強");
    }

    #[test]
    fn test_claimed_fallback_is_raw_lyric() {
        let table = default_table();
        let bank = Singer::new("test").with_alias_set(PrefixSuffixSet::new("power", "", "強"));
        let cur = Note::new("か強", 60);
        assert_eq!(resolve(&table, &cur, None, None, &bank).phoneme, "か強");
    }

    #[test]
    fn test_first_claiming_set_wins() {
        let table = default_table();
        let aliases = ["*- _か", "*_- か"];
        // Both sets claim "*_か"; which one strips it decides where the
        // phrase-start marker lands.
        let cur = Note::new("*_か", 60);

        let star_first = Singer::new("test")
            .with_alias_set(PrefixSuffixSet::new("star", "*", ""))
            .with_alias_set(PrefixSuffixSet::new("star-under", "*_", ""))
            .with_aliases(aliases);
        assert_eq!(resolve(&table, &cur, None, None, &star_first).phoneme, "*- _か");

        let under_first = Singer::new("test")
            .with_alias_set(PrefixSuffixSet::new("star-under", "*_", ""))
            .with_alias_set(PrefixSuffixSet::new("star", "*", ""))
            .with_aliases(aliases);
        assert_eq!(resolve(&table, &cur, None, None, &under_first).phoneme, "*_- か");
    }

    #[test]
    fn test_pitch_aware_validation() {
        let table = default_table();
        let bank = Singer::new("test")
            .with_subbank(Subbank::new("", "↑", "C5-B7").unwrap())
            .with_aliases(["a か↑"]);
        let prev = Note::new("あ", 72);
        let high = Note::new("か", 74);
        let low = Note::new("か", 60);
        assert_eq!(resolve(&table, &high, Some(&prev), None, &bank).phoneme, "a か");
        assert_eq!(resolve(&table, &low, Some(&prev), None, &bank).phoneme, "か");
    }

    #[test]
    fn test_nasal_continuation() {
        let table = default_table();
        let bank = singer(&["n か", "N カ"]);
        let hira = Note::new("か", 60);
        let kata = Note::new("カ", 60);
        assert_eq!(
            resolve(&table, &hira, Some(&Note::new("ん", 60)), None, &bank).phoneme,
            "n か"
        );
        assert_eq!(
            resolve(&table, &kata, Some(&Note::new("ン", 60)), None, &bank).phoneme,
            "N カ"
        );
    }

    #[test]
    fn test_next_neighbour_is_ignored() {
        let table = default_table();
        let bank = singer(&["a か"]);
        let prev = Note::new("あ", 60);
        let cur = Note::new("か", 60);
        let a = resolve(&table, &cur, Some(&prev), None, &bank);
        let b = resolve(&table, &cur, Some(&prev), Some(&Note::new("ん", 60)), &bank);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_voicebank_returns_lyric() {
        let table = default_table();
        let prev = Note::new("あ", 60);
        let cur = Note::new("か", 60);
        assert_eq!(
            resolve(&table, &cur, Some(&prev), None, &EmptyVoicebank).phoneme,
            "か"
        );
    }
}
