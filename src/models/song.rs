//! Song, track, measure, beat and note model
//!
//! The whole graph is read-only input to the exporter.

use serde::{Deserialize, Serialize};

use super::duration::{Duration, QUARTER_TIME};
use super::effects::NoteEffect;
use super::lyrics::TrackLyrics;
use crate::error::{ExportError, Result};

/// Number of independent voices per beat
pub const MAX_VOICES: usize = 2;

/// Instrument channel of the song
///
/// `route` is the already-resolved zero-based MIDI channel, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub program: u8,
    #[serde(default)]
    pub route: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Song {
    pub fn channel(&self, channel_id: u32) -> Option<&Channel> {
        self.channels.iter().find(|c| c.channel_id == channel_id)
    }
}

/// Open string of a track; `number` is 1-based, 1 = highest string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuitarString {
    pub number: u8,
    pub value: i32,
}

impl GuitarString {
    pub fn new(number: u8, value: i32) -> Self {
        Self { number, value }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub channel_id: u32,
    #[serde(default)]
    pub percussion: bool,
    #[serde(default)]
    pub strings: Vec<GuitarString>,
    #[serde(default)]
    pub lyrics: TrackLyrics,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl Track {
    pub fn string(&self, number: u8) -> Option<&GuitarString> {
        self.strings.iter().find(|s| s.number == number)
    }

    pub fn string_count(&self) -> usize {
        self.strings.len()
    }

    /// Standard six-string guitar tuning, high E first
    pub fn standard_tuning() -> Vec<GuitarString> {
        [64, 59, 55, 50, 45, 40]
            .iter()
            .enumerate()
            .map(|(i, value)| GuitarString::new(i as u8 + 1, *value))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Nominal measure length at `unit` ticks per quarter
    ///
    /// `None` for a zero denominator or a length past `u32`.
    pub fn measure_ticks(&self, unit: u32) -> Option<u32> {
        if self.denominator == 0 {
            return None;
        }
        Some(unit.checked_mul(4)?.checked_mul(self.numerator)? / self.denominator)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr,
)]
pub enum Clef {
    #[default]
    Treble = 1,
    Bass = 2,
    Tenor = 3,
    Alto = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tempo {
    pub value: u32,
}

impl Default for Tempo {
    fn default() -> Self {
        Self { value: 120 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measure {
    pub number: u32,
    pub time_signature: TimeSignature,
    /// 0 = no accidentals, 1..=7 sharps, 8..=14 flats
    pub key_signature: u8,
    pub clef: Clef,
    pub tempo: Tempo,
    pub repeat_open: bool,
    /// Backward repeat count, 0 = none
    pub repeat_close: u32,
    pub marker: Option<Marker>,
    pub beats: Vec<Beat>,
}

impl Measure {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Nominal length in song-model ticks
    pub fn length(&self) -> Result<u32> {
        self.time_signature
            .measure_ticks(QUARTER_TIME)
            .ok_or(ExportError::InvalidTimeSignature {
                measure: self.number,
            })
    }
}

/// Stroke direction of a strummed chord, stored as the model's signed code
#[repr(i8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr,
)]
pub enum StrokeDirection {
    #[default]
    None = 0,
    Up = 1,
    Down = -1,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub direction: StrokeDirection,
    pub value: u32,
}

/// One voice of a beat; no notes means a rest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voice {
    pub duration: Duration,
    pub notes: Vec<Note>,
    pub stroke: Stroke,
}

impl Voice {
    pub fn rest(duration: Duration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    pub fn with_notes(duration: Duration, notes: Vec<Note>) -> Self {
        Self {
            duration,
            notes,
            stroke: Stroke::default(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.notes.is_empty()
    }
}

/// A point in time of a measure; `start` is in ticks from measure start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    pub start: u32,
    #[serde(default, deserialize_with = "super::serde_helpers::pad_voices")]
    pub voices: [Voice; MAX_VOICES],
}

impl Beat {
    pub fn new(start: u32) -> Self {
        Self {
            start,
            voices: Default::default(),
        }
    }

    pub fn with_voice(mut self, index: usize, voice: Voice) -> Self {
        if let Some(slot) = self.voices.get_mut(index) {
            *slot = voice;
        }
        self
    }

    pub fn voice(&self, index: usize) -> Result<&Voice> {
        self.voices.get(index).ok_or(ExportError::VoiceOutOfRange {
            index,
            max: MAX_VOICES,
        })
    }
}

fn default_velocity() -> u8 {
    95
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// 1-based string number
    pub string: u8,
    /// Fret, added to the open string value to form the pitch
    pub fret: u8,
    #[serde(default = "default_velocity")]
    pub velocity: u8,
    #[serde(default)]
    pub tied: bool,
    #[serde(default)]
    pub effect: Option<NoteEffect>,
}

impl Note {
    pub fn new(string: u8, fret: u8) -> Self {
        Self {
            string,
            fret,
            velocity: default_velocity(),
            tied: false,
            effect: None,
        }
    }

    pub fn tied(mut self) -> Self {
        self.tied = true;
        self
    }
}
