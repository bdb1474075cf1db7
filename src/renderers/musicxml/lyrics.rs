//! Lyrics for MusicXML export
//!
//! Two halves: the segmenter turns a track's raw lyric text into per-measure
//! lists aligned to the sung beats of voice 0, and the cursor hands those
//! entries out to the first note of each beat while a measure is encoded.

use crate::ir::LyricData;
use crate::models::{Measure, MeasureLyric, Syllabic, TrackLyrics};

/// Split lyric text into syllables tagged with their place in the word
///
/// Whitespace separates words and a hyphen separates syllables of one word.
/// A trailing hyphen carries the word on to the next token, so `"a- b"`
/// reads as one word. Empty segments are dropped.
///
/// # Examples
///
/// - "hel-lo world" → [("hel", Begin), ("lo", End), ("world", Single)]
/// - "con-ti-nue" → [("con", Begin), ("ti", Middle), ("nue", End)]
pub fn parse_lyrics_to_syllables(lyrics: &str) -> Vec<(String, Syllabic)> {
    let (syllables, _) = lyrics.split_whitespace().fold(
        (Vec::new(), false),
        |(mut syllables, mut in_word), token| {
            let mut segments = token.split('-').peekable();
            while let Some(segment) = segments.next() {
                if segment.is_empty() {
                    continue;
                }
                let hyphen_follows = segments.peek().is_some();
                let syllabic = match (in_word, hyphen_follows) {
                    (false, false) => Syllabic::Single,
                    (false, true) => Syllabic::Begin,
                    (true, true) => Syllabic::Middle,
                    (true, false) => Syllabic::End,
                };
                syllables.push((segment.to_string(), syllabic));
                in_word = hyphen_follows;
            }
            (syllables, in_word)
        },
    );
    syllables
}

/// Splits a track's lyrics into per-measure lists
///
/// Starting at measure `from`, every non-rest beat of voice 0 takes the next
/// syllable. A beat whose notes are all tied continues the previous syllable
/// and gets an empty entry instead.
pub struct LyricSegmenter {
    syllables: Vec<(String, Syllabic)>,
    from: u32,
    next: usize,
}

impl LyricSegmenter {
    pub fn new(lyrics: &TrackLyrics) -> Self {
        Self {
            syllables: parse_lyrics_to_syllables(&lyrics.text),
            from: lyrics.from,
            next: 0,
        }
    }

    /// Lyric list for the next measure; measures must be fed in order
    pub fn generate_lyric_list(&mut self, measure: &Measure) -> Vec<MeasureLyric> {
        let mut list = Vec::new();
        if measure.number < self.from || self.next >= self.syllables.len() {
            return list;
        }

        for beat in &measure.beats {
            let voice = &beat.voices[0];
            if voice.is_rest() {
                continue;
            }
            if voice.notes.iter().all(|n| n.tied) {
                list.push(MeasureLyric::silent());
                continue;
            }
            match self.syllables.get(self.next) {
                Some((text, syllabic)) => {
                    list.push(MeasureLyric::new(*syllabic, text.clone()));
                    self.next += 1;
                }
                None => break,
            }
        }
        list
    }

    /// Syllables not yet assigned to any beat
    pub fn remaining(&self) -> usize {
        self.syllables.len().saturating_sub(self.next)
    }
}

/// Hands out a measure's lyric entries in beat order
///
/// Every request advances the index, whether or not it yields a lyric.
/// Past the end of the list, or on an empty text, nothing is attached.
#[derive(Debug, Clone)]
pub struct LyricCursor<'a> {
    lyrics: &'a [MeasureLyric],
    index: usize,
}

impl<'a> LyricCursor<'a> {
    pub fn new(lyrics: &'a [MeasureLyric]) -> Self {
        Self { lyrics, index: 0 }
    }

    pub fn next_lyric(&mut self) -> Option<LyricData> {
        let entry = self.lyrics.get(self.index);
        self.index += 1;
        entry.filter(|l| !l.text.is_empty()).map(|l| LyricData {
            syllabic: l.syllabic,
            text: l.text.clone(),
        })
    }
}
