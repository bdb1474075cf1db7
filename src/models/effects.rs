//! Guitar playing-technique effects attached to a note

use serde::{Deserialize, Serialize};

/// One point of a bend or tremolo-bar curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectPoint {
    pub position: i32,
    pub value: i32,
}

impl EffectPoint {
    pub fn new(position: i32, value: i32) -> Self {
        Self { position, value }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectBend {
    pub points: Vec<EffectPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTremoloBar {
    pub points: Vec<EffectPoint>,
}

/// Grace note played before (or on) the main note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectGrace {
    pub fret: i32,
    pub duration: i32,
    pub dynamic: i32,
    /// Transition code of the source model (none, slide, bend, hammer)
    pub transition: i32,
    pub on_beat: bool,
    pub dead: bool,
}

/// Harmonic kinds; the flags are independent of each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectHarmonic {
    pub natural: bool,
    pub pinched: bool,
    pub semi: bool,
}

/// Effect bundle of a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteEffect {
    pub fade_in: bool,
    pub let_ring: bool,
    pub popping: bool,
    pub slapping: bool,
    pub tapping: bool,
    pub staccato: bool,
    pub palm_mute: bool,
    pub heavy_accentuated: bool,
    pub accentuated: bool,
    pub ghost: bool,
    pub hammer: bool,
    pub slide: bool,
    pub vibrato: bool,
    pub dead: bool,
    pub bend: Option<EffectBend>,
    pub tremolo_bar: Option<EffectTremoloBar>,
    pub grace: Option<EffectGrace>,
    pub harmonic: Option<EffectHarmonic>,
}
