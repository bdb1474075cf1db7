//! MusicXML attribute handling
//!
//! Decides which measure attributes changed against the previous measure and
//! builds the `<attributes>` block. Declaration order is fixed: divisions,
//! key, time, clef, tuning.

use crate::ir::{AttributeBlock, ClefDecl, StaffTuning, StringTuning, TimeDecl};
use crate::models::{Clef, Measure, Track};

use super::pitch::{key_fifths, pitch_name};

/// Attributes that must be (re-)declared for a measure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeChanges {
    pub divisions: bool,
    pub key: bool,
    pub time: bool,
    pub clef: bool,
    pub tuning: bool,
}

impl AttributeChanges {
    /// Diff `measure` against `previous` (`None` on the first measure)
    ///
    /// Tuning follows the measure number: it is declared on the first measure
    /// and on any measure numbered 1, never for percussion tracks.
    pub fn between(measure: &Measure, previous: Option<&Measure>, percussion: bool) -> Self {
        match previous {
            None => Self {
                divisions: true,
                key: true,
                time: true,
                clef: true,
                tuning: !percussion,
            },
            Some(prev) => Self {
                divisions: false,
                key: measure.key_signature != prev.key_signature,
                time: measure.time_signature != prev.time_signature,
                clef: measure.clef != prev.clef,
                tuning: !percussion && measure.number == 1,
            },
        }
    }

    /// True when no `<attributes>` element is written.
    ///
    /// Tuning alone never opens a block.
    pub fn is_empty(&self) -> bool {
        !(self.divisions || self.key || self.time || self.clef)
    }
}

/// Build the attribute block for a measure, if anything changed
pub fn build_attribute_block(
    track: &Track,
    measure: &Measure,
    previous: Option<&Measure>,
    divisions: u32,
) -> Option<AttributeBlock> {
    let changes = AttributeChanges::between(measure, previous, track.percussion);
    if changes.is_empty() {
        return None;
    }

    let mut block = AttributeBlock::default();
    if changes.divisions {
        block.divisions = Some(divisions);
    }
    if changes.key {
        block.fifths = Some(key_fifths(measure.key_signature));
    }
    if changes.time {
        block.time = Some(TimeDecl {
            beats: measure.time_signature.numerator,
            beat_type: measure.time_signature.denominator,
        });
    }
    if changes.clef {
        block.clefs = clef_declarations(measure.clef, track.percussion);
    }
    if changes.tuning {
        block.tuning = Some(staff_tuning(track, measure.key_signature));
    }
    Some(block)
}

/// Clefs for the standard staff (number 1) and tab staff (number 2)
///
/// Percussion tracks have a single unnumbered percussion clef.
pub fn clef_declarations(clef: Clef, percussion: bool) -> Vec<ClefDecl> {
    if percussion {
        return vec![ClefDecl {
            number: None,
            sign: "percussion",
            line: None,
            octave_change: None,
        }];
    }

    let (sign, line, octave_change) = match clef {
        Clef::Treble => ("G", 2, Some(-1)),
        Clef::Bass => ("F", 4, Some(-1)),
        Clef::Tenor | Clef::Alto => ("G", 2, None),
    };

    vec![
        ClefDecl {
            number: Some(1),
            sign,
            line: Some(line),
            octave_change,
        },
        ClefDecl {
            number: Some(2),
            sign: "TAB",
            line: None,
            octave_change: None,
        },
    ]
}

/// `<staff-details>` for the tab staff, lowest string first
pub fn staff_tuning(track: &Track, key_signature: u8) -> StaffTuning {
    let count = track.string_count();
    let mut strings: Vec<_> = track.strings.iter().collect();
    strings.sort_by(|a, b| b.number.cmp(&a.number));

    let strings = strings
        .into_iter()
        .map(|s| StringTuning {
            line: count.saturating_sub(s.number as usize) + 1,
            string: s.number,
            midi_code: s.value,
            pitch: pitch_name(s.value, key_signature),
        })
        .collect();

    StaffTuning {
        staff: 2,
        lines: count,
        strings,
    }
}
