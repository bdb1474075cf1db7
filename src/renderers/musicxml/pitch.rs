// Pitch mapping for MusicXML export

use crate::ir::PitchInfo;

const SHARP_NAMES: [(char, i8); 12] = [
    ('C', 0),
    ('C', 1),
    ('D', 0),
    ('D', 1),
    ('E', 0),
    ('F', 0),
    ('F', 1),
    ('G', 0),
    ('G', 1),
    ('A', 0),
    ('A', 1),
    ('B', 0),
];

const FLAT_NAMES: [(char, i8); 12] = [
    ('C', 0),
    ('D', -1),
    ('D', 0),
    ('E', -1),
    ('E', 0),
    ('F', 0),
    ('G', -1),
    ('G', 0),
    ('A', -1),
    ('A', 0),
    ('B', -1),
    ('B', 0),
];

/// Convert a key signature code to the MusicXML `<fifths>` value
///
/// 0 means no accidentals, 1..=7 are sharp keys and 8..=14 flat keys:
/// `((v - 1) % 7 + 1) * (v > 7 ? -1 : 1)`.
pub fn key_fifths(key_signature: u8) -> i8 {
    if key_signature == 0 {
        return 0;
    }
    let magnitude = (((key_signature as i32 - 1) % 7) + 1) as i8;
    if key_signature > 7 {
        -magnitude
    } else {
        magnitude
    }
}

/// Name a MIDI pitch value in the given key
///
/// Sharp keys (and C) spell black keys with sharps, flat keys with flats.
/// Octave follows MIDI numbering: 60 is C4.
pub fn pitch_name(value: i32, key_signature: u8) -> PitchInfo {
    let table = if key_signature > 7 { &FLAT_NAMES } else { &SHARP_NAMES };
    let (step, alter) = table[value.rem_euclid(12) as usize];
    PitchInfo {
        step,
        alter,
        octave: value.div_euclid(12) - 1,
    }
}
