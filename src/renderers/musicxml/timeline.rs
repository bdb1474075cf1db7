//! Voice timeline for one (measure, voice, staff) pass
//!
//! The pass is a fold over the measure's beats with an explicit accumulator:
//!
//! ```text
//! [Leading]  rest beats are buffered, nothing written yet
//!    |
//!    +-- first sounding beat --> backup (unless cursor at measure start),
//!    |                           flush buffered rests, write notes
//!    v
//! [Writing]  notes are written, rests only where no earlier
//!            note of this voice still sounds
//! ```
//!
//! At the end, a voice that never sounded writes its buffered rests only on
//! the first pass of the measure; later passes drop them.

use std::mem;

use crate::error::{ExportError, Result};
use crate::ir::{Backup, MeasureContent, NoteEvent, StaffKind};
use crate::models::{Beat, Duration, Measure, MeasureLyric, Voice, MAX_VOICES};
use crate::musicxml_log;

use super::chord::encode_beat_notes;
use super::duration::encode_duration;
use super::lyrics::LyricCursor;
use super::measure::EncodeContext;

/// Rewind to measure start, spanning the nominal measure length
pub fn measure_backup(ctx: &EncodeContext<'_>, measure: &Measure) -> Result<Backup> {
    let duration = measure
        .time_signature
        .measure_ticks(ctx.settings.divisions)
        .ok_or(ExportError::InvalidTimeSignature {
            measure: measure.number,
        })?;
    Ok(Backup { duration })
}

/// Build the ordered events of one voice on one staff
///
/// `cursor_at_start` is true when nothing has been written to the measure
/// yet (first pass of a staff layer); otherwise the first sounding beat is
/// preceded by a backup. `lyrics` is only given for voice 0 of the standard
/// staff.
pub fn build_voice_timeline(
    ctx: &EncodeContext<'_>,
    measure: &Measure,
    voice_index: usize,
    staff: StaffKind,
    cursor_at_start: bool,
    lyrics: Option<&[MeasureLyric]>,
) -> Result<Vec<MeasureContent>> {
    if voice_index >= MAX_VOICES {
        return Err(ExportError::VoiceOutOfRange {
            index: voice_index,
            max: MAX_VOICES,
        });
    }

    let pass = VoicePass {
        ctx,
        measure,
        voice_index,
        staff,
        cursor_at_start,
    };
    let initial = PassState {
        leading_rests: Vec::new(),
        wrote_something: false,
        last_written_end: 0,
        lyrics: lyrics.map(LyricCursor::new),
        events: Vec::new(),
    };

    let state = measure
        .beats
        .iter()
        .try_fold(initial, |state, beat| pass.step(state, beat))?;
    pass.finish(state)
}

struct VoicePass<'a> {
    ctx: &'a EncodeContext<'a>,
    measure: &'a Measure,
    voice_index: usize,
    staff: StaffKind,
    cursor_at_start: bool,
}

struct PassState<'a> {
    leading_rests: Vec<&'a Beat>,
    wrote_something: bool,
    /// Model tick where the last written note of this voice ends
    last_written_end: u32,
    lyrics: Option<LyricCursor<'a>>,
    events: Vec<MeasureContent>,
}

impl<'a> VoicePass<'a> {
    fn step(&self, mut state: PassState<'a>, beat: &'a Beat) -> Result<PassState<'a>> {
        let voice = beat.voice(self.voice_index)?;

        if voice.is_rest() && !state.wrote_something {
            state.leading_rests.push(beat);
            return Ok(state);
        }

        if !state.wrote_something {
            if !self.cursor_at_start {
                musicxml_log!(
                    "measure {}: backup before voice {} on staff {}",
                    self.measure.number,
                    self.voice_index + 1,
                    self.staff.number()
                );
                state
                    .events
                    .push(MeasureContent::Backup(measure_backup(self.ctx, self.measure)?));
            }
            for rest_beat in mem::take(&mut state.leading_rests) {
                let event = self.rest_event(&rest_beat.voices[self.voice_index])?;
                state.events.push(event);
            }
        }

        if voice.is_rest() {
            if beat.start >= state.last_written_end {
                let event = self.rest_event(voice)?;
                state.events.push(event);
            } else {
                musicxml_log!(
                    "measure {}: rest at {} covered by note ending at {}",
                    self.measure.number,
                    beat.start,
                    state.last_written_end
                );
            }
            return Ok(state);
        }

        let lyric = match self.staff {
            StaffKind::Standard => state.lyrics.as_mut().and_then(|cursor| cursor.next_lyric()),
            StaffKind::Tablature => None,
        };
        let events = encode_beat_notes(
            self.ctx,
            self.measure,
            voice,
            self.voice_index,
            self.staff,
            lyric,
        )?;
        state.events.extend(events);
        state.last_written_end = beat
            .start
            .checked_add(self.model_ticks(&voice.duration)?)
            .ok_or(ExportError::BeatOutOfRange {
                measure: self.measure.number,
                start: beat.start,
            })?;
        state.wrote_something = true;
        Ok(state)
    }

    fn finish(&self, state: PassState<'a>) -> Result<Vec<MeasureContent>> {
        let PassState {
            leading_rests,
            wrote_something,
            mut events,
            ..
        } = state;

        if !wrote_something && !leading_rests.is_empty() {
            if self.cursor_at_start {
                for rest_beat in leading_rests {
                    events.push(self.rest_event(&rest_beat.voices[self.voice_index])?);
                }
            } else {
                musicxml_log!(
                    "measure {}: voice {} silent on staff {}, {} rests dropped",
                    self.measure.number,
                    self.voice_index + 1,
                    self.staff.number(),
                    leading_rests.len()
                );
            }
        }
        Ok(events)
    }

    fn rest_event(&self, voice: &Voice) -> Result<MeasureContent> {
        let duration = encode_duration(&voice.duration, self.ctx.settings.divisions, self.measure.number)?;
        Ok(MeasureContent::Note(NoteEvent {
            chord: false,
            pitch: None,
            duration,
            tied: false,
            voice: self.voice_index as u8 + 1,
            staff: self.staff,
            technical: None,
            lyric: None,
        }))
    }

    /// Length in song-model ticks; the class was checked when the notes were encoded
    fn model_ticks(&self, duration: &Duration) -> Result<u32> {
        duration.time().ok_or(ExportError::InvalidDivision {
            measure: self.measure.number,
            enters: duration.division.enters,
            times: duration.division.times,
        })
    }
}
