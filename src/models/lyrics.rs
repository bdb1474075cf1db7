//! Track lyrics and their per-measure segmentation

use serde::{Deserialize, Serialize};

/// Raw lyric text of a track
///
/// `from` is the measure number the first syllable is sung in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLyrics {
    pub from: u32,
    pub text: String,
}

impl Default for TrackLyrics {
    fn default() -> Self {
        Self {
            from: 1,
            text: String::new(),
        }
    }
}

impl TrackLyrics {
    pub fn new(from: u32, text: impl Into<String>) -> Self {
        Self {
            from,
            text: text.into(),
        }
    }
}

/// Syllabic type for lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syllabic {
    Single,
    Begin,
    Middle,
    End,
}

impl Syllabic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syllabic::Single => "single",
            Syllabic::Begin => "begin",
            Syllabic::Middle => "middle",
            Syllabic::End => "end",
        }
    }
}

/// One lyric entry of a measure, aligned to a sung beat of voice 0
///
/// An empty `text` occupies a beat without printing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureLyric {
    pub syllabic: Syllabic,
    pub text: String,
}

impl MeasureLyric {
    pub fn new(syllabic: Syllabic, text: impl Into<String>) -> Self {
        Self {
            syllabic,
            text: text.into(),
        }
    }

    /// Placeholder entry for a beat that takes no syllable
    pub fn silent() -> Self {
        Self::new(Syllabic::Single, "")
    }
}
