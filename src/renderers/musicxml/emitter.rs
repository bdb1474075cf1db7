//! MusicXML emitter - consumes IR and emits MusicXML strings
//!
//! Element names and child order are part of the output contract; consumers
//! read `<note>` children positionally.

use crate::ir::*;
use crate::models::EffectPoint;

use super::builder::XmlWriter;
use super::settings::ExportSettings;

pub const DOCTYPE_PUBLIC: &str = "-//Recordare//DTD MusicXML 4.0 Partwise//EN";
pub const DOCTYPE_SYSTEM: &str = "http://www.musicxml.org/dtds/partwise.dtd";

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Emit a complete MusicXML document from an encoded score
pub fn emit_musicxml(score: &EncodedScore, settings: &ExportSettings) -> String {
    let mut w = XmlWriter::new();
    w.declaration();
    if settings.include_doctype {
        w.doctype("score-partwise", DOCTYPE_PUBLIC, DOCTYPE_SYSTEM);
    }

    w.open("score-partwise", &[("version", settings.version.as_str())]);
    emit_header(&mut w, &score.header);
    emit_part_list(&mut w, &score.part_list);
    for part in &score.parts {
        emit_part(&mut w, part);
    }
    w.close("score-partwise");

    w.finalize()
}

fn emit_header(w: &mut XmlWriter, header: &ScoreHeader) {
    w.open("work", &[]);
    w.text_element("work-title", &header.title);
    w.close("work");

    w.open("identification", &[]);
    w.attributed_text_element("creator", &[("type", "composer")], &header.composer);
    w.open("encoding", &[]);
    w.text_element("software", &header.software);
    w.close("encoding");
    w.close("identification");
}

fn emit_part_list(w: &mut XmlWriter, parts: &[ScorePart]) {
    w.open("part-list", &[]);
    for part in parts {
        w.open("score-part", &[("id", part.id.as_str())]);
        w.text_element("part-name", &part.name);
        if let Some(instrument) = &part.instrument {
            w.open("score-instrument", &[("id", instrument.id.as_str())]);
            w.text_element("instrument-name", &instrument.name);
            w.close("score-instrument");
            w.open("midi-instrument", &[("id", instrument.id.as_str())]);
            w.text_element("midi-channel", instrument.midi_channel);
            w.text_element("midi-program", instrument.midi_program);
            w.close("midi-instrument");
        }
        w.close("score-part");
    }
    w.close("part-list");
}

fn emit_part(w: &mut XmlWriter, part: &EncodedPart) {
    w.open("part", &[("id", part.id.as_str())]);
    for measure in &part.measures {
        w.open("measure", &[("number", measure.number.to_string().as_str())]);
        for content in &measure.contents {
            emit_measure_content(w, content);
        }
        w.close("measure");
    }
    w.close("part");
}

/// Emit one measure content element
pub fn emit_measure_content(w: &mut XmlWriter, content: &MeasureContent) {
    match content {
        MeasureContent::Attributes(block) => emit_attributes(w, block),
        MeasureContent::Direction(direction) => {
            w.open("direction", &[("placement", "above")]);
            w.open("direction-type", &[]);
            w.open("metronome", &[]);
            w.text_element("beat-unit", "quarter");
            w.text_element("per-minute", direction.per_minute);
            w.close("metronome");
            w.close("direction-type");
            w.close("direction");
        }
        MeasureContent::Barline(barline) => {
            w.open("barline", &[]);
            if barline.repeat_forward {
                w.empty("repeat", &[("direction", "forward")]);
            }
            if let Some(times) = barline.repeat_backward {
                w.empty("repeat", &[("direction", "backward"), ("times", times.to_string().as_str())]);
            }
            w.close("barline");
        }
        MeasureContent::Backup(backup) => {
            w.open("backup", &[]);
            w.text_element("duration", backup.duration);
            w.close("backup");
        }
        MeasureContent::Note(note) => emit_note(w, note),
        MeasureContent::Chord(group) => {
            let direction = group.stroke_direction.to_string();
            let value = group.stroke_value.to_string();
            w.open("chord", &[("stroke", direction.as_str()), ("value", value.as_str())]);
            for note in &group.notes {
                emit_note(w, note);
            }
            w.close("chord");
        }
        MeasureContent::Tablature(layer) => {
            w.open("tablature", &[]);
            if let Some(marker) = &layer.marker {
                w.text_element("marker", marker);
            }
            for content in &layer.contents {
                emit_measure_content(w, content);
            }
            w.close("tablature");
        }
    }
}

fn emit_attributes(w: &mut XmlWriter, block: &AttributeBlock) {
    w.open("attributes", &[]);
    if let Some(divisions) = block.divisions {
        w.text_element("divisions", divisions);
    }
    if let Some(fifths) = block.fifths {
        w.open("key", &[]);
        w.text_element("fifths", fifths);
        w.close("key");
    }
    if let Some(time) = block.time {
        w.open("time", &[]);
        w.text_element("beats", time.beats);
        w.text_element("beat-type", time.beat_type);
        w.close("time");
    }
    for clef in &block.clefs {
        let number = clef.number.map(|n| n.to_string());
        let attributes: Vec<(&str, &str)> = number.iter().map(|n| ("number", n.as_str())).collect();
        w.open("clef", &attributes);
        w.text_element("sign", clef.sign);
        if let Some(line) = clef.line {
            w.text_element("line", line);
        }
        if let Some(change) = clef.octave_change {
            w.text_element("clef-octave-change", change);
        }
        w.close("clef");
    }
    if let Some(tuning) = &block.tuning {
        w.open("staff-details", &[("number", tuning.staff.to_string().as_str())]);
        w.text_element("staff-lines", tuning.lines);
        for string in &tuning.strings {
            w.open(
                "staff-tuning",
                &[
                    ("line", string.line.to_string().as_str()),
                    ("string", string.string.to_string().as_str()),
                    ("midiCode", string.midi_code.to_string().as_str()),
                ],
            );
            emit_pitch(w, "tuning-", &string.pitch);
            w.close("staff-tuning");
        }
        w.close("staff-details");
    }
    w.close("attributes");
}

fn emit_pitch(w: &mut XmlWriter, prefix: &str, pitch: &PitchInfo) {
    w.text_element(&format!("{}step", prefix), pitch.step);
    if pitch.alter != 0 {
        w.text_element(&format!("{}alter", prefix), pitch.alter);
    }
    w.text_element(&format!("{}octave", prefix), pitch.octave);
}

fn emit_note(w: &mut XmlWriter, note: &NoteEvent) {
    w.open("note", &[]);
    if note.chord {
        w.empty("chord", &[]);
    }
    match &note.pitch {
        Some(pitch) => {
            w.open("pitch", &[]);
            emit_pitch(w, "", pitch);
            w.close("pitch");
        }
        None => w.empty("rest", &[]),
    }

    let duration = &note.duration;
    w.text_element("duration", duration.ticks);
    if note.tied {
        w.empty("tie", &[("type", "stop")]);
    }
    w.text_element("voice", note.voice);
    w.text_element("type", duration.note_type.as_str());
    for _ in 0..duration.dots {
        w.empty("dot", &[]);
    }
    if let Some(tuplet) = duration.tuplet {
        w.open("time-modification", &[]);
        w.text_element("actual-notes", tuplet.actual_notes);
        w.text_element("normal-notes", tuplet.normal_notes);
        w.close("time-modification");
    }
    w.text_element("staff", note.staff.number());

    if let Some(technical) = &note.technical {
        w.open("notations", &[]);
        w.open("technical", &[]);
        w.text_element("fret", technical.fret);
        w.text_element("string", technical.string);
        w.text_element("velocity", technical.velocity);
        for annotation in &technical.annotations {
            emit_annotation(w, annotation);
        }
        w.close("technical");
        w.close("notations");
    }

    if let Some(lyric) = &note.lyric {
        w.open("lyric", &[]);
        w.text_element("syllabic", lyric.syllabic.as_str());
        w.text_element("text", &lyric.text);
        w.close("lyric");
    }
    w.close("note");
}

fn emit_points(w: &mut XmlWriter, group: &str, point_name: &str, points: &[EffectPoint]) {
    w.open(group, &[]);
    for point in points {
        w.empty(
            point_name,
            &[
                ("position", point.position.to_string().as_str()),
                ("value", point.value.to_string().as_str()),
            ],
        );
    }
    w.close(group);
}

fn emit_annotation(w: &mut XmlWriter, annotation: &Annotation) {
    match annotation {
        Annotation::Flag(technique) => w.empty(technique.xml_name(), &[]),
        Annotation::Bend(points) => emit_points(w, "bend", "bend_point", points),
        Annotation::TremoloBar(points) => emit_points(w, "tremolo_bar", "tb_point", points),
        Annotation::Grace(grace) => w.empty(
            "grace",
            &[
                ("fret", grace.fret.to_string().as_str()),
                ("duration", grace.duration.to_string().as_str()),
                ("dynamic", grace.dynamic.to_string().as_str()),
                ("transition", grace.transition.to_string().as_str()),
                ("onBeat", flag(grace.on_beat)),
                ("dead", flag(grace.dead)),
            ],
        ),
        Annotation::Harmonic(harmonic) => w.empty(
            "harmonic",
            &[
                ("natural", flag(harmonic.natural)),
                ("pinched", flag(harmonic.pinched)),
                ("semi", flag(harmonic.semi)),
            ],
        ),
    }
}
