// Japanese VCV phonemizer.
//
// Resolves each sung note to the sample alias a VCV (vowel-consonant-vowel)
// voicebank should play: "a か" when the previous note ends in あ-row, "- か"
// at phrase start, the note's own hint when the user wrote one, and the raw
// lyric whenever the voicebank has nothing recorded for the composed alias.
//
// Architecture:
// - note.rs: `Note` / `Phoneme` / `Song` (JSON) and the `Tone` pitch type
// - voicebank.rs: `OtoAliasSet` and `Voicebank` traits, first-claim scan,
//   `EmptyVoicebank`
// - singer.rs: JSON-loadable `Singer` with prefix/suffix alias sets and
//   tone-ranged subbanks
// - resolver.rs: the per-note resolution algorithm
// - phonemizer.rs: `Phonemizer` host contract + `JapaneseVcvPhonemizer`
// - track.rs: neighbour wiring by adjacency, sequential and rayon resolution
// - error.rs: `LoadError` for reading singers, songs, and vowel tables
// - main.rs: `phonemize` CLI
//
// Vowel classification lives in the `vcv_kana` crate. Resolution never fails
// and never mutates the voicebank, so any number of notes can be resolved in
// parallel against one bound voicebank.

pub mod error;
pub mod note;
pub mod phonemizer;
pub mod resolver;
pub mod singer;
pub mod track;
pub mod voicebank;

pub use error::LoadError;
pub use note::{Note, Phoneme, Song, Tone};
pub use phonemizer::{JapaneseVcvPhonemizer, Phonemizer};
pub use resolver::{PHRASE_START, resolve};
pub use singer::{PrefixSuffixSet, Singer, Subbank};
pub use track::{neighbours, par_resolve_track, resolve_track};
pub use voicebank::{EmptyVoicebank, OtoAliasSet, Voicebank, claim_lyric};
