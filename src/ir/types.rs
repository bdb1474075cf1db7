//! Intermediate Representation (IR) for MusicXML export
//!
//! The encoder produces this tree; the emitter renders it to text. Every
//! element is an owned value, so an encoded measure can be inspected in tests
//! or serialized to JSON without touching XML.
//!
//! ```text
//! EncodedScore
//! ├── header (title, composer, software)
//! ├── part_list: Vec<ScorePart>
//! └── parts: Vec<EncodedPart>
//!     └── measures: Vec<EncodedMeasure>
//!         └── contents: Vec<MeasureContent>
//!             ├── Attributes / Direction / Barline
//!             ├── Backup
//!             ├── Note / Chord          (standard staff)
//!             └── Tablature { Note / Chord / Backup }   (tab staff)
//! ```

use serde::Serialize;

use crate::models::{EffectPoint, Syllabic};

/// Which rendering of the measure an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StaffKind {
    Standard,
    Tablature,
}

impl StaffKind {
    /// Value of the `<staff>` element
    pub fn number(&self) -> u8 {
        match self {
            StaffKind::Standard => 1,
            StaffKind::Tablature => 2,
        }
    }
}

/// MusicXML note type names, whole through 64th
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoteType {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteType {
    pub const ALL: [NoteType; 7] = [
        NoteType::Whole,
        NoteType::Half,
        NoteType::Quarter,
        NoteType::Eighth,
        NoteType::Sixteenth,
        NoteType::ThirtySecond,
        NoteType::SixtyFourth,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Whole => "whole",
            NoteType::Half => "half",
            NoteType::Quarter => "quarter",
            NoteType::Eighth => "eighth",
            NoteType::Sixteenth => "16th",
            NoteType::ThirtySecond => "32nd",
            NoteType::SixtyFourth => "64th",
        }
    }
}

/// `<time-modification>`: (actual-notes, normal-notes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeModification {
    pub actual_notes: u32,
    pub normal_notes: u32,
}

/// Output of the duration codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodedDuration {
    pub ticks: u32,
    pub note_type: NoteType,
    pub dots: u8,
    pub tuplet: Option<TimeModification>,
}

/// Step letter, alteration (-1, 0, 1) and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchInfo {
    pub step: char,
    pub alter: i8,
    pub octave: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricData {
    pub syllabic: Syllabic,
    pub text: String,
}

/// Boolean playing techniques, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TechniqueFlag {
    FadeIn,
    LetRing,
    Popping,
    Slapping,
    Tapping,
    Staccato,
    PalmMute,
    HeavyAccentuated,
    Accentuated,
    Ghost,
    Hammer,
    Slide,
    Vibrato,
    Dead,
}

impl TechniqueFlag {
    /// Get the element name for this technique
    pub fn xml_name(&self) -> &'static str {
        match self {
            TechniqueFlag::FadeIn => "fadeIn",
            TechniqueFlag::LetRing => "legato",
            TechniqueFlag::Popping => "popping",
            TechniqueFlag::Slapping => "slapping",
            TechniqueFlag::Tapping => "tapping",
            TechniqueFlag::Staccato => "staccato",
            TechniqueFlag::PalmMute => "palm_mute",
            TechniqueFlag::HeavyAccentuated => "heavy_accentuated",
            TechniqueFlag::Accentuated => "accentuated",
            TechniqueFlag::Ghost => "ghost",
            TechniqueFlag::Hammer => "hammer",
            TechniqueFlag::Slide => "slide",
            TechniqueFlag::Vibrato => "vibrato",
            TechniqueFlag::Dead => "dead",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraceAnnotation {
    pub fret: i32,
    pub duration: i32,
    pub dynamic: i32,
    pub transition: i32,
    pub on_beat: bool,
    pub dead: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarmonicAnnotation {
    pub natural: bool,
    pub pinched: bool,
    pub semi: bool,
}

/// Child of `<technical>` after fret/string/velocity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Annotation {
    Flag(TechniqueFlag),
    Bend(Vec<EffectPoint>),
    TremoloBar(Vec<EffectPoint>),
    Grace(GraceAnnotation),
    Harmonic(HarmonicAnnotation),
}

/// `<notations><technical>` of a tab-staff note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Technical {
    pub fret: u8,
    pub string: u8,
    pub velocity: u8,
    pub annotations: Vec<Annotation>,
}

/// A `<note>` element; `pitch == None` is a rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEvent {
    /// MusicXML `<chord/>` marker (native chord style only)
    pub chord: bool,
    pub pitch: Option<PitchInfo>,
    pub duration: EncodedDuration,
    pub tied: bool,
    /// 1-based voice number
    pub voice: u8,
    pub staff: StaffKind,
    pub technical: Option<Technical>,
    pub lyric: Option<LyricData>,
}

impl NoteEvent {
    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }
}

/// Simultaneous notes of one beat sharing stroke and duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordGroup {
    pub stroke_direction: i8,
    pub stroke_value: u32,
    pub notes: Vec<NoteEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClefDecl {
    pub number: Option<u8>,
    pub sign: &'static str,
    pub line: Option<u8>,
    pub octave_change: Option<i8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StringTuning {
    pub line: usize,
    pub string: u8,
    pub midi_code: i32,
    pub pitch: PitchInfo,
}

/// `<staff-details>` of the tab staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffTuning {
    pub staff: u8,
    pub lines: usize,
    pub strings: Vec<StringTuning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeDecl {
    pub beats: u32,
    pub beat_type: u32,
}

/// `<attributes>`; absent parts are not re-declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeBlock {
    pub divisions: Option<u32>,
    pub fifths: Option<i8>,
    pub time: Option<TimeDecl>,
    pub clefs: Vec<ClefDecl>,
    pub tuning: Option<StaffTuning>,
}

/// `<direction>` with a quarter-note metronome mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TempoDirection {
    pub per_minute: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Barline {
    pub repeat_forward: bool,
    /// Backward repeat with its `times` count
    pub repeat_backward: Option<u32>,
}

/// Cursor rewind to measure start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Backup {
    pub duration: u32,
}

/// One tab-staff voice pass, wrapped in `<tablature>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablatureLayer {
    pub marker: Option<String>,
    pub contents: Vec<MeasureContent>,
}

/// Ordered content of a `<measure>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MeasureContent {
    Attributes(AttributeBlock),
    Direction(TempoDirection),
    Barline(Barline),
    Backup(Backup),
    Note(NoteEvent),
    Chord(ChordGroup),
    Tablature(TablatureLayer),
}

impl MeasureContent {
    /// Signed movement of the measure cursor caused by this element
    pub fn advance(&self) -> i64 {
        match self {
            MeasureContent::Note(note) if note.chord => 0,
            MeasureContent::Note(note) => note.duration.ticks as i64,
            MeasureContent::Chord(group) => group
                .notes
                .first()
                .map(|n| n.duration.ticks as i64)
                .unwrap_or(0),
            MeasureContent::Backup(backup) => -(backup.duration as i64),
            MeasureContent::Tablature(layer) => layer.contents.iter().map(|c| c.advance()).sum(),
            MeasureContent::Attributes(_) | MeasureContent::Direction(_) | MeasureContent::Barline(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedMeasure {
    pub number: u32,
    pub contents: Vec<MeasureContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedPart {
    pub id: String,
    pub measures: Vec<EncodedMeasure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartInstrument {
    pub id: String,
    pub name: String,
    /// 1-based
    pub midi_channel: u8,
    /// 1-based
    pub midi_program: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorePart {
    pub id: String,
    pub name: String,
    pub instrument: Option<PartInstrument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreHeader {
    pub title: String,
    pub composer: String,
    pub software: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedScore {
    pub header: ScoreHeader,
    pub part_list: Vec<ScorePart>,
    pub parts: Vec<EncodedPart>,
}
