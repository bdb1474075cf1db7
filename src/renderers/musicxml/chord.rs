//! Note encoding for one beat of one voice
//!
//! All notes of the beat share the voice's duration, computed once. More than
//! one note forms a chord: either a `<chord stroke value>` group carrying the
//! beat's stroke, or MusicXML's own `<chord/>` marker, per [`ChordStyle`].

use crate::error::{ExportError, Result};
use crate::ir::{ChordGroup, LyricData, MeasureContent, NoteEvent, StaffKind};
use crate::models::{Measure, Voice};

use super::duration::encode_duration;
use super::effects::technical_for;
use super::measure::EncodeContext;
use super::pitch::pitch_name;
use super::settings::ChordStyle;

/// Encode the notes of a non-rest voice
///
/// `lyric` goes to the first note, and only on the standard staff.
pub fn encode_beat_notes(
    ctx: &EncodeContext<'_>,
    measure: &Measure,
    voice: &Voice,
    voice_index: usize,
    staff: StaffKind,
    lyric: Option<LyricData>,
) -> Result<Vec<MeasureContent>> {
    let duration = encode_duration(&voice.duration, ctx.settings.divisions, measure.number)?;
    let mut lyric = if staff == StaffKind::Standard { lyric } else { None };

    let mut notes = Vec::with_capacity(voice.notes.len());
    for note in &voice.notes {
        let string = ctx.track.string(note.string).ok_or(ExportError::UnknownString {
            measure: measure.number,
            string: note.string,
        })?;

        notes.push(NoteEvent {
            chord: false,
            pitch: Some(pitch_name(string.value + note.fret as i32, measure.key_signature)),
            duration,
            tied: note.tied,
            voice: voice_index as u8 + 1,
            staff,
            technical: (staff == StaffKind::Tablature).then(|| technical_for(note)),
            lyric: lyric.take(),
        });
    }

    if notes.len() <= 1 {
        return Ok(notes.into_iter().map(MeasureContent::Note).collect());
    }

    match ctx.settings.chord_style {
        ChordStyle::Grouped => Ok(vec![MeasureContent::Chord(ChordGroup {
            stroke_direction: voice.stroke.direction as i8,
            stroke_value: voice.stroke.value,
            notes,
        })]),
        ChordStyle::Native => Ok(notes
            .into_iter()
            .enumerate()
            .map(|(n, mut note)| {
                note.chord = n > 0;
                MeasureContent::Note(note)
            })
            .collect()),
    }
}
