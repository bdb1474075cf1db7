//! Song to MusicXML converter
//!
//! Main entry point for exporting a [`Song`] as a MusicXML partwise document.

use std::io::Write;

use crate::error::Result;
use crate::ir::{EncodedPart, EncodedScore, PartInstrument, ScoreHeader, ScorePart};
use crate::models::{Song, Track};
use crate::musicxml_log;

use super::emitter::emit_musicxml;
use super::lyrics::LyricSegmenter;
use super::measure::{encode_measure, EncodeContext};
use super::settings::ExportSettings;

/// MIDI channel used when a track's channel has no route
const UNROUTED_MIDI_CHANNEL: u8 = 16;

fn part_id(track: &Track) -> String {
    format!("P{}", track.number)
}

/// Part-list entry of a track, with its instrument when the channel resolves
pub fn score_part(song: &Song, track: &Track) -> ScorePart {
    let id = part_id(track);
    let instrument = song.channel(track.channel_id).map(|channel| PartInstrument {
        id: format!("{}-I1", id),
        name: channel.name.clone(),
        midi_channel: channel
            .route
            .map_or(UNROUTED_MIDI_CHANNEL, |route| route.saturating_add(1)),
        midi_program: channel.program as u16 + 1,
    });
    ScorePart {
        id,
        name: track.name.clone(),
        instrument,
    }
}

/// Encode every measure of one track
pub fn encode_track(track: &Track, settings: &ExportSettings) -> Result<EncodedPart> {
    let ctx = EncodeContext::new(track, settings);
    let mut segmenter = LyricSegmenter::new(&track.lyrics);
    let mut measures = Vec::with_capacity(track.measures.len());
    let mut previous = None;

    for measure in &track.measures {
        let lyrics = segmenter.generate_lyric_list(measure);
        measures.push(encode_measure(&ctx, measure, previous, &lyrics)?);
        previous = Some(measure);
    }

    if segmenter.remaining() > 0 {
        log::warn!(
            "[MusicXML] track {}: {} lyric syllables left without a beat",
            track.number,
            segmenter.remaining()
        );
    }

    Ok(EncodedPart {
        id: part_id(track),
        measures,
    })
}

/// Encode a whole song into the descriptor tree
pub fn encode_song(song: &Song, settings: &ExportSettings) -> Result<EncodedScore> {
    musicxml_log!("Starting MusicXML export of '{}' with {} tracks", song.name, song.tracks.len());

    let part_list = song.tracks.iter().map(|track| score_part(song, track)).collect();
    let parts = song
        .tracks
        .iter()
        .map(|track| encode_track(track, settings))
        .collect::<Result<Vec<_>>>()?;

    Ok(EncodedScore {
        header: ScoreHeader {
            title: song.name.clone(),
            composer: song.author.clone(),
            software: settings.software.clone(),
        },
        part_list,
        parts,
    })
}

/// Export a song to a MusicXML document string
pub fn to_musicxml(song: &Song, settings: &ExportSettings) -> Result<String> {
    let score = encode_song(song, settings)?;
    let xml = emit_musicxml(&score, settings);
    musicxml_log!("MusicXML export complete: {} bytes", xml.len());
    Ok(xml)
}

/// Export a song into `sink`
///
/// The document is rendered completely before the first byte is written; on
/// an encoding error the sink is left untouched.
pub fn write_song<W: Write>(song: &Song, settings: &ExportSettings, sink: &mut W) -> Result<()> {
    let xml = to_musicxml(song, settings)?;
    sink.write_all(xml.as_bytes())?;
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::models::{Beat, Channel, Duration, Measure, Note, Voice};

    fn song_with_channel(route: Option<u8>) -> Song {
        Song {
            name: "Test".to_string(),
            author: "Someone".to_string(),
            channels: vec![Channel {
                channel_id: 7,
                name: "Steel Guitar".to_string(),
                program: 25,
                route,
            }],
            tracks: vec![Track {
                number: 3,
                name: "Lead".to_string(),
                channel_id: 7,
                strings: Track::standard_tuning(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_score_part_instrument() {
        let song = song_with_channel(Some(2));
        let part = score_part(&song, &song.tracks[0]);
        assert_eq!(part.id, "P3");
        let instrument = part.instrument.unwrap();
        assert_eq!(instrument.id, "P3-I1");
        assert_eq!((instrument.midi_channel, instrument.midi_program), (3, 26));

        let unrouted = song_with_channel(None);
        let part = score_part(&unrouted, &unrouted.tracks[0]);
        assert_eq!(part.instrument.map(|i| i.midi_channel), Some(16));
    }

    #[test]
    fn test_missing_channel_has_no_instrument() {
        let mut song = song_with_channel(None);
        song.channels.clear();
        assert!(score_part(&song, &song.tracks[0]).instrument.is_none());
    }

    #[test]
    fn test_write_song_leaves_sink_empty_on_error() {
        let mut song = song_with_channel(None);
        let mut measure = Measure::new(1);
        measure.beats = vec![Beat::new(0).with_voice(
            0,
            Voice::with_notes(Duration::new(9), vec![Note::new(1, 0)]),
        )];
        song.tracks[0].measures.push(measure);

        let mut sink = Vec::new();
        let err = write_song(&song, &ExportSettings::default(), &mut sink).unwrap_err();
        assert!(matches!(err, ExportError::InvalidDurationClass { measure: 1, index: 9 }));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_write_song_writes_document() {
        let mut song = song_with_channel(Some(0));
        let mut measure = Measure::new(1);
        measure.beats = vec![Beat::new(0).with_voice(
            0,
            Voice::with_notes(Duration::new(Duration::WHOLE), vec![Note::new(1, 5)]),
        )];
        song.tracks[0].measures.push(measure);

        let mut sink = Vec::new();
        write_song(&song, &ExportSettings::default(), &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<part id=\"P3\">"));
        assert!(text.contains("<creator type=\"composer\">Someone</creator>"));
    }
}
