// Duration codec for MusicXML export

use crate::error::{ExportError, Result};
use crate::ir::{EncodedDuration, NoteType, TimeModification};
use crate::models::{Dotting, DivisionType, Duration};

/// Encode a model duration as ticks, note type, dots and tuplet ratio
///
/// Ticks are `base * times / enters`, then dotted: a single dot adds half,
/// a double dot adds three quarters (`ticks / 4 * 3`). A 1/1 division
/// produces no time-modification.
///
/// `measure` is only used to locate malformed input in the error.
///
/// # Examples
/// ```
/// use tab_musicxml::models::{Duration, DivisionType};
/// use tab_musicxml::renderers::musicxml::duration::encode_duration;
///
/// let triplet = Duration::new(Duration::QUARTER).with_division(DivisionType::TRIPLET);
/// let encoded = encode_duration(&triplet, 960, 1).unwrap();
/// assert_eq!(encoded.ticks, 640);
/// assert_eq!(encoded.note_type.as_str(), "quarter");
/// ```
pub fn encode_duration(duration: &Duration, unit: u32, measure: u32) -> Result<EncodedDuration> {
    let note_type = NoteType::from_index(duration.index).ok_or_else(|| {
        log::warn!("measure {}: unencodable duration class {}", measure, duration.index);
        ExportError::InvalidDurationClass {
            measure,
            index: duration.index,
        }
    })?;

    let division = duration.division;
    let ticks = duration.ticks(unit).ok_or_else(|| {
        log::warn!(
            "measure {}: division {}/{} does not give a length in ticks",
            measure,
            division.enters,
            division.times
        );
        ExportError::InvalidDivision {
            measure,
            enters: division.enters,
            times: division.times,
        }
    })?;

    let tuplet = if division.is_normal() {
        None
    } else {
        Some(TimeModification {
            actual_notes: division.enters,
            normal_notes: division.times,
        })
    };

    Ok(EncodedDuration {
        ticks,
        note_type,
        dots: duration.dotting.dot_count(),
        tuplet,
    })
}

/// Reconstruct the tick value from the emitted type, dots and tuplet
///
/// `None` when the written form does not fit in `u32` ticks.
pub fn decode_ticks(encoded: &EncodedDuration, unit: u32) -> Option<u32> {
    let division = encoded
        .tuplet
        .map_or(DivisionType::NORMAL, |t| DivisionType::new(t.actual_notes, t.normal_notes));
    Duration {
        index: encoded.note_type.index(),
        dotting: Dotting::from_count(encoded.dots),
        division,
    }
    .ticks(unit)
}
