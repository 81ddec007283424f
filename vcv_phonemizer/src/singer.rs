// In-memory voicebank loaded from JSON.
//
// `Singer` implements `Voicebank` for hosts that do not bring their own
// voicebank loader, and for tests. It holds:
// - alias sets (`PrefixSuffixSet`), tried in file order, for style variants
//   spelled into the lyric (e.g. "か強" for a power sample set);
// - subbanks (`Subbank`), pitch-dependent decorations selected by tone range
//   (e.g. low samples suffixed "↓" below C4);
// - the set of sample aliases actually recorded.
//
// The JSON structure is `SingerFile`; `Singer::from_json` converts it,
// parsing tone sets like "C1-B3,C5" into inclusive MIDI ranges.
//
// Mapped-sample lookup tries the first subbank whose tone set covers the
// note's tone, decorating the alias with that subbank's prefix/suffix, then
// falls back to the bare alias.

use crate::error::LoadError;
use crate::note::Tone;
use crate::voicebank::{OtoAliasSet, Voicebank};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

/// Alias set whose aliases share a prefix and suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixSuffixSet {
    pub name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl PrefixSuffixSet {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        PrefixSuffixSet {
            name: name.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl OtoAliasSet for PrefixSuffixSet {
    /// An undecorated set claims nothing; otherwise the lyric must carry
    /// both prefix and suffix around a non-empty remainder.
    fn claim(&self, lyric: &str) -> Option<String> {
        if self.prefix.is_empty() && self.suffix.is_empty() {
            return None;
        }
        let stripped = lyric
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        (!stripped.is_empty()).then(|| stripped.to_string())
    }

    fn decorate(&self, identifier: &str) -> String {
        format!("{}{}{}", self.prefix, identifier, self.suffix)
    }
}

/// Pitch-dependent decoration, selected by tone.
#[derive(Debug, Clone)]
pub struct Subbank {
    pub prefix: String,
    pub suffix: String,
    /// Tone set as written, e.g. "C1-B3,C5".
    pub tone_set: String,
    ranges: Vec<RangeInclusive<Tone>>,
}

impl Subbank {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        tone_set: impl Into<String>,
    ) -> Result<Self, LoadError> {
        let tone_set = tone_set.into();
        let ranges = parse_tone_set(&tone_set)?;
        Ok(Subbank {
            prefix: prefix.into(),
            suffix: suffix.into(),
            tone_set,
            ranges,
        })
    }

    pub fn covers(&self, tone: Tone) -> bool {
        self.ranges.iter().any(|r| r.contains(&tone))
    }
}

/// Parse a note name like "C4", "F#3", "Bb-1" into a MIDI note number.
pub fn parse_tone_name(name: &str) -> Result<Tone, LoadError> {
    let invalid = || LoadError::InvalidToneName(name.to_string());
    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    let pitch_class: Tone = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(invalid()),
    };
    let rest = chars.as_str();
    let (accidental, octave) = if let Some(octave) = rest.strip_prefix('#') {
        (1, octave)
    } else if let Some(octave) = rest.strip_prefix('b') {
        (-1, octave)
    } else {
        (0, rest)
    };
    let octave: Tone = octave.parse().map_err(|_| invalid())?;
    if !(-1..=9).contains(&octave) {
        return Err(invalid());
    }
    let tone = (octave + 1) * 12 + pitch_class + accidental;
    if (0..=127).contains(&tone) {
        Ok(tone)
    } else {
        Err(invalid())
    }
}

/// Parse a comma-separated list of note names and inclusive ranges.
pub fn parse_tone_set(tone_set: &str) -> Result<Vec<RangeInclusive<Tone>>, LoadError> {
    tone_set
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| -> Result<RangeInclusive<Tone>, LoadError> {
            match split_range(item) {
                Some((low, high)) => {
                    let low = parse_tone_name(low.trim())?;
                    let high = parse_tone_name(high.trim())?;
                    Ok(low.min(high)..=low.max(high))
                }
                None => {
                    let tone = parse_tone_name(item)?;
                    Ok(tone..=tone)
                }
            }
        })
        .collect()
}

/// Split "C1-B3" at the range dash. A dash directly after the letter or
/// accidental is a negative octave ("C-1"), not a range.
fn split_range(item: &str) -> Option<(&str, &str)> {
    let (at, _) = item
        .char_indices()
        .find(|&(i, c)| c == '-' && item[..i].ends_with(|p: char| p.is_ascii_digit()))?;
    Some((&item[..at], &item[at + 1..]))
}

/// JSON layout of a singer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingerFile {
    pub name: String,
    #[serde(default)]
    pub alias_sets: Vec<PrefixSuffixSet>,
    #[serde(default)]
    pub subbanks: Vec<SubbankDef>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// JSON layout of a subbank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubbankDef {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub tone_set: String,
}

/// A loaded voicebank.
#[derive(Debug, Clone)]
pub struct Singer {
    pub name: String,
    alias_sets: Vec<PrefixSuffixSet>,
    subbanks: Vec<Subbank>,
    aliases: FxHashSet<String>,
}

impl Singer {
    pub fn new(name: impl Into<String>) -> Self {
        Singer {
            name: name.into(),
            alias_sets: Vec::new(),
            subbanks: Vec::new(),
            aliases: FxHashSet::default(),
        }
    }

    /// A singer with nothing recorded.
    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn with_alias_set(mut self, set: PrefixSuffixSet) -> Self {
        self.alias_sets.push(set);
        self
    }

    pub fn with_subbank(mut self, subbank: Subbank) -> Self {
        self.subbanks.push(subbank);
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn from_file(file: SingerFile) -> Result<Self, LoadError> {
        let subbanks = file
            .subbanks
            .into_iter()
            .map(|def| Subbank::new(def.prefix, def.suffix, def.tone_set))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Singer {
            name: file.name,
            alias_sets: file.alias_sets,
            subbanks,
            aliases: file.aliases.into_iter().collect(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let file: SingerFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Back to the JSON layout, aliases sorted for stable output.
    pub fn to_file(&self) -> SingerFile {
        let mut aliases: Vec<String> = self.aliases.iter().cloned().collect();
        aliases.sort();
        SingerFile {
            name: self.name.clone(),
            alias_sets: self.alias_sets.clone(),
            subbanks: self
                .subbanks
                .iter()
                .map(|s| SubbankDef {
                    prefix: s.prefix.clone(),
                    suffix: s.suffix.clone(),
                    tone_set: s.tone_set.clone(),
                })
                .collect(),
            aliases,
        }
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string(&self.to_file())?)
    }

    pub fn subbanks(&self) -> &[Subbank] {
        &self.subbanks
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// The recorded alias that `identifier` maps to at `tone`, if any.
    pub fn mapped_alias(&self, identifier: &str, tone: Tone) -> Option<&str> {
        if let Some(subbank) = self.subbanks.iter().find(|s| s.covers(tone)) {
            let decorated = format!("{}{}{}", subbank.prefix, identifier, subbank.suffix);
            if let Some(alias) = self.aliases.get(&decorated) {
                return Some(alias.as_str());
            }
        }
        self.aliases.get(identifier).map(String::as_str)
    }
}

impl Voicebank for Singer {
    type AliasSet = PrefixSuffixSet;

    fn alias_sets(&self) -> &[PrefixSuffixSet] {
        &self.alias_sets
    }

    fn has_mapped_sample(&self, identifier: &str, tone: Tone) -> bool {
        self.mapped_alias(identifier, tone).is_some()
    }
}
