// Host-facing phonemizer contract and the Japanese VCV implementation.
//
// A host binds a voicebank once (`set_voicebank`, rebindable between songs
// or tracks), then calls `process` per note with the note's neighbours.
// `process` takes a slice starting at the current note so the contract can
// grow to multi-note phonemes; the VCV phonemizer only looks at the first.
//
// `JapaneseVcvPhonemizer` owns an `Arc` to its vowel table (the shared
// built-in table by default) and an `Arc` to the bound voicebank. It is
// `Send + Sync` whenever the voicebank is, so one instance can serve
// parallel resolution.

use crate::note::{Note, Phoneme};
use crate::resolver::resolve;
use crate::singer::Singer;
use crate::voicebank::{EmptyVoicebank, Voicebank};
use std::sync::Arc;
use vcv_kana::{VowelTable, default_table};

pub trait Phonemizer {
    type Bank: Voicebank;

    /// Display name.
    fn name(&self) -> &str;

    /// Short tag shown on tracks.
    fn tag(&self) -> &str;

    /// Bind the voicebank used by subsequent `process` calls.
    fn set_voicebank(&mut self, voicebank: Arc<Self::Bank>);

    /// Phonemes for `notes[0]`. Empty input yields no phonemes.
    fn process(&self, notes: &[Note], prev: Option<&Note>, next: Option<&Note>) -> Vec<Phoneme>;
}

/// VCV phonemizer for kana lyrics.
#[derive(Debug, Clone)]
pub struct JapaneseVcvPhonemizer<V = Singer> {
    table: Arc<VowelTable>,
    voicebank: Option<Arc<V>>,
}

impl<V: Voicebank> JapaneseVcvPhonemizer<V> {
    /// Phonemizer over the built-in Japanese vowel table.
    pub fn new() -> Self {
        Self::with_table(default_table())
    }

    /// Phonemizer over a custom vowel table.
    pub fn with_table(table: Arc<VowelTable>) -> Self {
        JapaneseVcvPhonemizer {
            table,
            voicebank: None,
        }
    }

    pub fn table(&self) -> &VowelTable {
        &self.table
    }

    pub fn voicebank(&self) -> Option<&V> {
        self.voicebank.as_deref()
    }
}

impl<V: Voicebank> Default for JapaneseVcvPhonemizer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Voicebank> Phonemizer for JapaneseVcvPhonemizer<V> {
    type Bank = V;

    fn name(&self) -> &str {
        "Japanese VCV Phonemizer"
    }

    fn tag(&self) -> &str {
        "JP VCV"
    }

    fn set_voicebank(&mut self, voicebank: Arc<V>) {
        self.voicebank = Some(voicebank);
    }

    fn process(&self, notes: &[Note], prev: Option<&Note>, next: Option<&Note>) -> Vec<Phoneme> {
        let Some(note) = notes.first() else {
            return Vec::new();
        };
        // Unbound behaves as an empty voicebank: hint or raw lyric.
        let phoneme = match self.voicebank.as_deref() {
            Some(bank) => resolve(&self.table, note, prev, next, bank),
            None => resolve(&self.table, note, prev, next, &EmptyVoicebank),
        };
        vec![phoneme]
    }
}
