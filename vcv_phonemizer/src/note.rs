// Notes in, phonemes out.
//
// `Note` is the read-only input the host hands the phonemizer: lyric,
// optional phonetic hint, tone (MIDI note number), and its tick span, which
// decides whether two notes are adjacent. `Phoneme` is the resolved sample
// alias. `Song` is the JSON container the `phonemize` binary reads.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pitch of a note as a MIDI note number (C4 = 60).
pub type Tone = i32;

/// A sung note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub lyric: String,
    /// Explicit phoneme override. Absent or empty means none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic_hint: Option<String>,
    pub tone: Tone,
    /// Start, in ticks.
    #[serde(default)]
    pub position: i32,
    /// Length, in ticks.
    #[serde(default)]
    pub duration: i32,
}

impl Note {
    pub fn new(lyric: impl Into<String>, tone: Tone) -> Self {
        Note {
            lyric: lyric.into(),
            phonetic_hint: None,
            tone,
            position: 0,
            duration: 0,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.phonetic_hint = Some(hint.into());
        self
    }

    pub fn at(mut self, position: i32, duration: i32) -> Self {
        self.position = position;
        self.duration = duration;
        self
    }

    /// The phonetic hint, if present and non-empty.
    pub fn hint(&self) -> Option<&str> {
        self.phonetic_hint.as_deref().filter(|h| !h.is_empty())
    }

    /// Tick just past the end of the note. Widened so that no span from
    /// song JSON can overflow.
    pub fn end(&self) -> i64 {
        i64::from(self.position) + i64::from(self.duration)
    }
}

/// A resolved sample alias for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phoneme {
    pub phoneme: String,
    /// Offset from the note start, in ticks.
    #[serde(default)]
    pub position: i32,
}

impl Phoneme {
    pub fn new(phoneme: impl Into<String>) -> Self {
        Phoneme {
            phoneme: phoneme.into(),
            position: 0,
        }
    }
}

/// A note sequence as stored in JSON: `{"notes": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub notes: Vec<Note>,
}

impl Song {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
