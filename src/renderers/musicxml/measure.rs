//! Measure encoding
//!
//! Content order of an encoded measure:
//!
//! ```text
//! attributes?  direction?  barline?
//! voice 1 .. voice N        (standard staff, backup before each later voice)
//! backup                    (tab staff only, not for percussion)
//! tablature(voice 1) .. tablature(voice N)
//! ```

use crate::error::Result;
use crate::ir::{Barline, EncodedMeasure, MeasureContent, StaffKind, TablatureLayer, TempoDirection};
use crate::models::{Measure, MeasureLyric, Track, MAX_VOICES};
use crate::musicxml_log;

use super::attributes::build_attribute_block;
use super::settings::ExportSettings;
use super::timeline::{build_voice_timeline, measure_backup};

/// Track-level data shared by every pass of a measure
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub track: &'a Track,
    pub settings: &'a ExportSettings,
}

impl<'a> EncodeContext<'a> {
    pub fn new(track: &'a Track, settings: &'a ExportSettings) -> Self {
        Self { track, settings }
    }
}

/// Metronome mark when the tempo differs from the previous measure
pub fn tempo_direction(measure: &Measure, previous: Option<&Measure>) -> Option<TempoDirection> {
    let changed = previous.map_or(true, |prev| prev.tempo.value != measure.tempo.value);
    changed.then_some(TempoDirection {
        per_minute: measure.tempo.value,
    })
}

/// Repeat barline, if the measure opens or closes a repeat
pub fn repeat_barline(measure: &Measure) -> Option<Barline> {
    if !measure.repeat_open && measure.repeat_close == 0 {
        return None;
    }
    Some(Barline {
        repeat_forward: measure.repeat_open,
        repeat_backward: (measure.repeat_close > 0).then_some(measure.repeat_close),
    })
}

/// Encode one measure of a track
///
/// `lyrics` is the measure's lyric list; it is attached to voice 0 of the
/// standard staff.
pub fn encode_measure(
    ctx: &EncodeContext<'_>,
    measure: &Measure,
    previous: Option<&Measure>,
    lyrics: &[MeasureLyric],
) -> Result<EncodedMeasure> {
    musicxml_log!(
        "encoding measure {} ({} beats) of track {}",
        measure.number,
        measure.beats.len(),
        ctx.track.number
    );

    let mut contents = Vec::new();

    if let Some(block) = build_attribute_block(ctx.track, measure, previous, ctx.settings.divisions) {
        contents.push(MeasureContent::Attributes(block));
    }
    if let Some(direction) = tempo_direction(measure, previous) {
        contents.push(MeasureContent::Direction(direction));
    }
    if let Some(barline) = repeat_barline(measure) {
        contents.push(MeasureContent::Barline(barline));
    }

    for voice_index in 0..MAX_VOICES {
        let voice_lyrics = (voice_index == 0).then_some(lyrics);
        contents.extend(build_voice_timeline(
            ctx,
            measure,
            voice_index,
            StaffKind::Standard,
            voice_index == 0,
            voice_lyrics,
        )?);
    }

    if !ctx.track.percussion {
        contents.push(MeasureContent::Backup(measure_backup(ctx, measure)?));
        let marker = measure.marker.as_ref().map(|m| m.title.clone());
        for voice_index in 0..MAX_VOICES {
            let layer = build_voice_timeline(
                ctx,
                measure,
                voice_index,
                StaffKind::Tablature,
                voice_index == 0,
                None,
            )?;
            contents.push(MeasureContent::Tablature(TablatureLayer {
                marker: marker.clone(),
                contents: layer,
            }));
        }
    }

    Ok(EncodedMeasure {
        number: measure.number,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Beat, Duration, Marker, Note, Tempo, Voice};

    fn guitar() -> Track {
        Track {
            number: 1,
            strings: Track::standard_tuning(),
            ..Default::default()
        }
    }

    fn two_voice_measure(number: u32) -> Measure {
        let mut measure = Measure::new(number);
        let half = Duration::new(Duration::HALF);
        measure.beats = vec![
            Beat::new(0)
                .with_voice(0, Voice::with_notes(half, vec![Note::new(1, 0)]))
                .with_voice(1, Voice::rest(half)),
            Beat::new(1920)
                .with_voice(0, Voice::with_notes(half, vec![Note::new(1, 3)]))
                .with_voice(1, Voice::with_notes(half, vec![Note::new(6, 0)])),
        ];
        measure
    }

    #[test]
    fn test_first_measure_layout() {
        let track = guitar();
        let settings = ExportSettings::default();
        let ctx = EncodeContext::new(&track, &settings);
        let encoded = encode_measure(&ctx, &two_voice_measure(1), None, &[]).unwrap();

        assert!(matches!(encoded.contents[0], MeasureContent::Attributes(_)));
        assert!(matches!(encoded.contents[1], MeasureContent::Direction(TempoDirection { per_minute: 120 })));
        assert!(matches!(encoded.contents[2], MeasureContent::Note(_)));

        let layers = encoded
            .contents
            .iter()
            .filter(|c| matches!(c, MeasureContent::Tablature(_)))
            .count();
        assert_eq!(layers, MAX_VOICES);

        // Both staves rewind fully: the measure ends one measure past its start
        let total: i64 = encoded.contents.iter().map(|c| c.advance()).sum();
        assert_eq!(total, 3840);
    }

    #[test]
    fn test_unchanged_measure_has_no_header_elements() {
        let track = guitar();
        let settings = ExportSettings::default();
        let ctx = EncodeContext::new(&track, &settings);
        let first = two_voice_measure(1);
        let second = two_voice_measure(2);
        let encoded = encode_measure(&ctx, &second, Some(&first), &[]).unwrap();
        assert!(matches!(encoded.contents[0], MeasureContent::Note(_)));
    }

    #[test]
    fn test_tempo_change_and_repeats() {
        let first = two_voice_measure(1);
        let mut second = two_voice_measure(2);
        second.tempo = Tempo { value: 90 };
        second.repeat_open = true;
        second.repeat_close = 2;

        assert_eq!(tempo_direction(&second, Some(&first)), Some(TempoDirection { per_minute: 90 }));
        assert_eq!(tempo_direction(&first, Some(&first)), None);
        assert_eq!(
            repeat_barline(&second),
            Some(Barline {
                repeat_forward: true,
                repeat_backward: Some(2)
            })
        );
        assert_eq!(repeat_barline(&first), None);
    }

    #[test]
    fn test_percussion_has_no_tab_layer() {
        let track = Track {
            percussion: true,
            ..guitar()
        };
        let settings = ExportSettings::default();
        let ctx = EncodeContext::new(&track, &settings);
        let encoded = encode_measure(&ctx, &two_voice_measure(1), None, &[]).unwrap();
        assert!(!encoded
            .contents
            .iter()
            .any(|c| matches!(c, MeasureContent::Tablature(_))));
    }

    #[test]
    fn test_marker_repeated_on_each_tab_layer() {
        let track = guitar();
        let settings = ExportSettings::default();
        let ctx = EncodeContext::new(&track, &settings);
        let mut measure = two_voice_measure(1);
        measure.marker = Some(Marker {
            title: "Verse".to_string(),
        });
        let encoded = encode_measure(&ctx, &measure, None, &[]).unwrap();
        let markers: Vec<Option<String>> = encoded
            .contents
            .iter()
            .filter_map(|c| match c {
                MeasureContent::Tablature(layer) => Some(layer.marker.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(markers, vec![Some("Verse".to_string()); MAX_VOICES]);
    }
}
