// Test: Song export to MusicXML, checked by walking the emitted document
//
// Fixture (4/4, standard tuning):
//   m1  v1: E4 (bend) | G4 | A3 half        v2: rest | rest | E2 half
//   m2  v1: C4 C4 C4 quarter triplets | E2+B2 half chord, stroke down   (key 3)
//   m3  whole rest                                                       (key 8)
//   m4  whole rest                                                       (key 14)

use roxmltree::{Document, Node, ParsingOptions};
use serde_json::json;
use tab_musicxml::{
    to_musicxml, ChordStyle, DivisionType, Duration, ExportError, ExportSettings, Song, TimeSignature,
};

fn standard_strings() -> serde_json::Value {
    json!([
        {"number": 1, "value": 64},
        {"number": 2, "value": 59},
        {"number": 3, "value": 55},
        {"number": 4, "value": 50},
        {"number": 5, "value": 45},
        {"number": 6, "value": 40}
    ])
}

fn rest(index: u8) -> serde_json::Value {
    json!({"duration": {"index": index}})
}

fn fixture_song() -> Song {
    let triplet = json!({"index": 2, "division": {"enters": 3, "times": 2}});
    let triplet_beat = |start: u32| {
        json!({"start": start, "voices": [
            {"duration": triplet, "notes": [{"string": 2, "fret": 1}]},
            rest(2)
        ]})
    };

    let value = json!({
        "name": "Fixture",
        "author": "Tester",
        "channels": [{"channel_id": 1, "name": "Nylon Guitar", "program": 24, "route": 0}],
        "tracks": [{
            "number": 1,
            "name": "Guitar",
            "channel_id": 1,
            "strings": standard_strings(),
            "measures": [
                {
                    "number": 1,
                    "beats": [
                        {"start": 0, "voices": [
                            {"duration": {"index": 2}, "notes": [{
                                "string": 1, "fret": 0,
                                "effect": {"bend": {"points": [
                                    {"position": 0, "value": 0},
                                    {"position": 50, "value": 4}
                                ]}}
                            }]},
                            rest(2)
                        ]},
                        {"start": 960, "voices": [
                            {"duration": {"index": 2}, "notes": [{"string": 1, "fret": 3}]},
                            rest(2)
                        ]},
                        {"start": 1920, "voices": [
                            {"duration": {"index": 1}, "notes": [{"string": 3, "fret": 2}]},
                            {"duration": {"index": 1}, "notes": [{"string": 6, "fret": 0}]}
                        ]}
                    ]
                },
                {
                    "number": 2,
                    "key_signature": 3,
                    "beats": [
                        triplet_beat(0),
                        triplet_beat(640),
                        triplet_beat(1280),
                        {"start": 1920, "voices": [
                            {
                                "duration": {"index": 1},
                                "notes": [{"string": 6, "fret": 0}, {"string": 5, "fret": 2}],
                                "stroke": {"direction": -1, "value": 8}
                            },
                            rest(1)
                        ]}
                    ]
                },
                {
                    "number": 3,
                    "key_signature": 8,
                    "beats": [{"start": 0, "voices": [rest(0), rest(0)]}]
                },
                {
                    "number": 4,
                    "key_signature": 14,
                    "beats": [{"start": 0, "voices": [rest(0), rest(0)]}]
                }
            ]
        }]
    });
    serde_json::from_value(value).unwrap()
}

fn parse(xml: &str) -> Document<'_> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options).unwrap()
}

fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Node<'a, 'i> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .unwrap_or_else(|| panic!("<{}> has no <{}>", node.tag_name().name(), name))
}

fn text_of(node: Node, name: &str) -> String {
    child(node, name).text().unwrap_or_default().to_string()
}

fn measures<'a, 'i>(doc: &'a Document<'i>) -> Vec<Node<'a, 'i>> {
    let part = doc.descendants().find(|n| n.has_tag_name("part")).unwrap();
    part.children().filter(|n| n.has_tag_name("measure")).collect()
}

/// Notes written straight into a measure (standard staff)
fn standard_notes<'a, 'i>(measure: Node<'a, 'i>) -> Vec<Node<'a, 'i>> {
    measure
        .children()
        .filter(|n| n.has_tag_name("note") || n.has_tag_name("chord"))
        .flat_map(|n| {
            if n.has_tag_name("chord") {
                n.children().filter(|c| c.has_tag_name("note")).collect::<Vec<_>>()
            } else {
                vec![n]
            }
        })
        .collect()
}

fn element_names(node: Node) -> Vec<String> {
    node.children()
        .filter(|n| n.is_element())
        .map(|n| n.tag_name().name().to_string())
        .collect()
}

fn duration_of(note: Node) -> i64 {
    text_of(note, "duration").parse().unwrap()
}

/// Tick sums of every voice pass, split at `<backup>`
fn pass_sums(measure: Node) -> Vec<i64> {
    fn walk(node: Node, current: &mut i64, sums: &mut Vec<i64>) {
        for item in node.children().filter(|n| n.is_element()) {
            match item.tag_name().name() {
                "backup" => {
                    if *current != 0 {
                        sums.push(*current);
                    }
                    *current = 0;
                }
                "note" if !item.children().any(|c| c.has_tag_name("chord")) => {
                    *current += duration_of(item);
                }
                "chord" => *current += duration_of(child(item, "note")),
                "tablature" => walk(item, current, sums),
                _ => {}
            }
        }
    }

    let mut sums = Vec::new();
    let mut current = 0;
    walk(measure, &mut current, &mut sums);
    if current != 0 {
        sums.push(current);
    }
    sums
}

#[test]
fn test_document_header_and_part_list() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\""));
    assert!(xml.contains("-//Recordare//DTD MusicXML 4.0 Partwise//EN"));

    let doc = parse(&xml);
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "score-partwise");
    assert_eq!(root.attribute("version"), Some("4.0"));
    assert_eq!(text_of(child(root, "work"), "work-title"), "Fixture");

    let creator = child(child(root, "identification"), "creator");
    assert_eq!(creator.attribute("type"), Some("composer"));
    assert_eq!(creator.text(), Some("Tester"));

    let score_part = child(child(root, "part-list"), "score-part");
    assert_eq!(score_part.attribute("id"), Some("P1"));
    assert_eq!(text_of(score_part, "part-name"), "Guitar");
    let midi = child(score_part, "midi-instrument");
    assert_eq!(midi.attribute("id"), Some("P1-I1"));
    assert_eq!(text_of(midi, "midi-channel"), "1");
    assert_eq!(text_of(midi, "midi-program"), "25");

    assert_eq!(child(root, "part").attribute("id"), Some("P1"));
    assert_eq!(measures(&doc).len(), 4);
}

#[test]
fn test_first_measure_attributes() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let first = measures(&doc)[0];
    assert_eq!(first.attribute("number"), Some("1"));

    let attributes = child(first, "attributes");
    assert_eq!(
        element_names(attributes),
        vec!["divisions", "key", "time", "clef", "clef", "staff-details"]
    );
    assert_eq!(text_of(attributes, "divisions"), "960");
    assert_eq!(text_of(child(attributes, "time"), "beats"), "4");
    assert_eq!(text_of(child(attributes, "time"), "beat-type"), "4");

    let clefs: Vec<Node> = attributes.children().filter(|n| n.has_tag_name("clef")).collect();
    assert_eq!(clefs[0].attribute("number"), Some("1"));
    assert_eq!(text_of(clefs[0], "sign"), "G");
    assert_eq!(text_of(clefs[0], "line"), "2");
    assert_eq!(text_of(clefs[0], "clef-octave-change"), "-1");
    assert_eq!(clefs[1].attribute("number"), Some("2"));
    assert_eq!(text_of(clefs[1], "sign"), "TAB");

    let details = child(attributes, "staff-details");
    assert_eq!(details.attribute("number"), Some("2"));
    assert_eq!(text_of(details, "staff-lines"), "6");
    let tunings: Vec<Node> = details
        .children()
        .filter(|n| n.has_tag_name("staff-tuning"))
        .collect();
    assert_eq!(tunings.len(), 6);
    assert_eq!(tunings[0].attribute("line"), Some("1"));
    assert_eq!(tunings[0].attribute("string"), Some("6"));
    assert_eq!(tunings[0].attribute("midiCode"), Some("40"));
    assert_eq!(text_of(tunings[0], "tuning-step"), "E");
    assert_eq!(text_of(tunings[0], "tuning-octave"), "2");
    assert_eq!(tunings[5].attribute("string"), Some("1"));
    assert_eq!(text_of(tunings[5], "tuning-octave"), "4");

    let metronome = child(child(child(first, "direction"), "direction-type"), "metronome");
    assert_eq!(text_of(metronome, "beat-unit"), "quarter");
    assert_eq!(text_of(metronome, "per-minute"), "120");
}

#[test]
fn test_key_signature_transform() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let fifths: Vec<String> = measures(&doc)
        .iter()
        .map(|m| text_of(child(child(*m, "attributes"), "key"), "fifths"))
        .collect();
    assert_eq!(fifths, vec!["0", "3", "-1", "-7"]);

    // Later attribute blocks only carry what changed
    let second = child(measures(&doc)[1], "attributes");
    assert_eq!(element_names(second), vec!["key"]);
}

#[test]
fn test_every_voice_pass_spans_the_measure() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let sums: Vec<Vec<i64>> = measures(&doc).iter().map(|m| pass_sums(*m)).collect();
    assert_eq!(sums[0], vec![3840; 4]);
    assert_eq!(sums[1], vec![3840; 2]);
    assert_eq!(sums[2], vec![3840; 2]);
    assert_eq!(sums[3], vec![3840; 2]);
}

#[test]
fn test_note_child_order() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let first = measures(&doc)[0];

    let notes = standard_notes(first);
    assert_eq!(element_names(notes[0]), vec!["pitch", "duration", "voice", "type", "staff"]);
    let pitch = child(notes[0], "pitch");
    assert_eq!(element_names(pitch), vec!["step", "octave"]);
    assert_eq!(text_of(pitch, "step"), "E");
    assert_eq!(text_of(pitch, "octave"), "4");

    let rests: Vec<Node> = notes
        .iter()
        .copied()
        .filter(|n| n.children().any(|c| c.has_tag_name("rest")))
        .collect();
    assert_eq!(rests.len(), 2);
    assert!(rests.iter().all(|r| text_of(*r, "voice") == "2"));

    let tab = child(first, "tablature");
    let tab_note = child(tab, "note");
    assert_eq!(
        element_names(tab_note),
        vec!["pitch", "duration", "voice", "type", "staff", "notations"]
    );
    assert_eq!(text_of(tab_note, "staff"), "2");
    let technical = child(child(tab_note, "notations"), "technical");
    assert_eq!(text_of(technical, "fret"), "0");
    assert_eq!(text_of(technical, "string"), "1");
    assert_eq!(text_of(technical, "velocity"), "95");
}

#[test]
fn test_bend_only_on_tab_staff() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let first = measures(&doc)[0];

    assert!(standard_notes(first)
        .iter()
        .all(|n| !n.descendants().any(|d| d.has_tag_name("bend"))));

    let tab_note = child(child(first, "tablature"), "note");
    let bend = tab_note.descendants().find(|d| d.has_tag_name("bend")).unwrap();
    let points: Vec<(Option<&str>, Option<&str>)> = bend
        .children()
        .filter(|n| n.has_tag_name("bend_point"))
        .map(|p| (p.attribute("position"), p.attribute("value")))
        .collect();
    assert_eq!(points, vec![(Some("0"), Some("0")), (Some("50"), Some("4"))]);
}

#[test]
fn test_triplet_time_modification() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let second = measures(&doc)[1];

    let triplets: Vec<Node> = standard_notes(second)
        .into_iter()
        .filter(|n| n.children().any(|c| c.has_tag_name("time-modification")))
        .collect();
    assert_eq!(triplets.len(), 3);
    for note in triplets {
        assert_eq!(duration_of(note), 640);
        assert_eq!(text_of(note, "type"), "quarter");
        let modification = child(note, "time-modification");
        assert_eq!(text_of(modification, "actual-notes"), "3");
        assert_eq!(text_of(modification, "normal-notes"), "2");
    }
}

#[test]
fn test_grouped_chord_wrapper() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let chord = child(measures(&doc)[1], "chord");
    assert_eq!(chord.attribute("stroke"), Some("-1"));
    assert_eq!(chord.attribute("value"), Some("8"));

    let notes: Vec<Node> = chord.children().filter(|n| n.has_tag_name("note")).collect();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| duration_of(*n) == 1920));
    assert_eq!(text_of(child(notes[1], "pitch"), "step"), "B");
}

#[test]
fn test_native_chord_marker() {
    let settings = ExportSettings {
        chord_style: ChordStyle::Native,
        include_doctype: false,
        ..ExportSettings::default()
    };
    let xml = to_musicxml(&fixture_song(), &settings).unwrap();
    assert!(!xml.contains("<!DOCTYPE"));

    let doc = parse(&xml);
    let second = measures(&doc)[1];
    assert!(!second.children().any(|n| n.has_tag_name("chord")));

    let notes: Vec<Node> = second.children().filter(|n| n.has_tag_name("note")).collect();
    let marked: Vec<bool> = notes
        .iter()
        .map(|n| n.first_element_child().map(|c| c.has_tag_name("chord")) == Some(true))
        .collect();
    assert_eq!(marked, vec![false, false, false, false, true]);
    assert_eq!(pass_sums(second), vec![3840; 2]);
}

#[test]
fn test_rest_only_measure_writes_full_rest() {
    let xml = to_musicxml(&fixture_song(), &ExportSettings::default()).unwrap();
    let doc = parse(&xml);
    let third = measures(&doc)[2];

    let notes = standard_notes(third);
    assert_eq!(notes.len(), 1);
    assert!(notes[0].children().any(|c| c.has_tag_name("rest")));
    assert_eq!(text_of(notes[0], "type"), "whole");
    assert_eq!(duration_of(notes[0]), 3840);
}

#[test]
fn test_invalid_duration_fails_export() {
    let mut song = fixture_song();
    song.tracks[0].measures[1].beats[0].voices[0].duration.index = 7;
    let err = to_musicxml(&song, &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidDurationClass { measure: 2, index: 7 }));
}

#[test]
fn test_lengths_past_tick_range_fail_export() {
    let mut song = fixture_song();
    song.tracks[0].measures[0].beats[0].voices[0].duration =
        Duration::new(Duration::WHOLE).with_division(DivisionType::new(1, 2_000_000));
    let err = to_musicxml(&song, &ExportSettings::default()).unwrap_err();
    assert!(matches!(
        err,
        ExportError::InvalidDivision { measure: 1, enters: 1, times: 2_000_000 }
    ));

    let settings = ExportSettings {
        divisions: 2_000_000_000,
        ..ExportSettings::default()
    };
    let err = to_musicxml(&fixture_song(), &settings).unwrap_err();
    assert!(matches!(err, ExportError::InvalidDivision { measure: 1, .. }));

    let mut song = fixture_song();
    song.tracks[0].measures[0].time_signature = TimeSignature::new(2_000_000, 4);
    let err = to_musicxml(&song, &ExportSettings::default()).unwrap_err();
    assert!(matches!(err, ExportError::InvalidTimeSignature { measure: 1 }));
}
