// Voicebank capabilities the resolver consumes.
//
// A voicebank exposes an ordered list of alias sets (style variants sharing
// a prefix/suffix decoration) and a pitch-aware "is there a sample for this
// alias" query. The resolver only reads through these traits; it never
// mutates voicebank state.
//
// `claim_lyric` implements the first-claim scan: alias sets are tried in
// registration order and the first one that claims the lyric wins.
//
// See also: `singer.rs` for the JSON-loadable implementation.

use crate::note::Tone;
use std::convert::Infallible;

/// A named group of sample aliases sharing one decoration convention.
pub trait OtoAliasSet {
    /// If this set claims `lyric`, return it with the decoration stripped.
    fn claim(&self, lyric: &str) -> Option<String>;

    /// Apply this set's decoration to a composed identifier.
    fn decorate(&self, identifier: &str) -> String;
}

/// Read-only view of a voicebank.
pub trait Voicebank {
    type AliasSet: OtoAliasSet;

    /// Alias sets in registration order.
    fn alias_sets(&self) -> &[Self::AliasSet];

    /// Whether a sample is mapped for `identifier` at `tone`.
    fn has_mapped_sample(&self, identifier: &str, tone: Tone) -> bool;
}

/// Find the first alias set that claims `lyric`, with the stripped lyric.
pub fn claim_lyric<'v, V>(voicebank: &'v V, lyric: &str) -> Option<(&'v V::AliasSet, String)>
where
    V: Voicebank + ?Sized,
{
    voicebank
        .alias_sets()
        .iter()
        .find_map(|set| set.claim(lyric).map(|stripped| (set, stripped)))
}

impl OtoAliasSet for Infallible {
    fn claim(&self, _lyric: &str) -> Option<String> {
        match *self {}
    }

    fn decorate(&self, _identifier: &str) -> String {
        match *self {}
    }
}

/// A voicebank with no alias sets and no samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyVoicebank;

impl Voicebank for EmptyVoicebank {
    type AliasSet = Infallible;

    fn alias_sets(&self) -> &[Infallible] {
        &[]
    }

    fn has_mapped_sample(&self, _identifier: &str, _tone: Tone) -> bool {
        false
    }
}
