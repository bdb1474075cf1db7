//! Playing-technique annotations for tab-staff notes

use crate::ir::{Annotation, GraceAnnotation, HarmonicAnnotation, Technical, TechniqueFlag};
use crate::models::{Note, NoteEffect};

/// Technique flags in emission order
fn technique_flags(effect: &NoteEffect) -> [(bool, TechniqueFlag); 14] {
    [
        (effect.fade_in, TechniqueFlag::FadeIn),
        (effect.let_ring, TechniqueFlag::LetRing),
        (effect.popping, TechniqueFlag::Popping),
        (effect.slapping, TechniqueFlag::Slapping),
        (effect.tapping, TechniqueFlag::Tapping),
        (effect.staccato, TechniqueFlag::Staccato),
        (effect.palm_mute, TechniqueFlag::PalmMute),
        (effect.heavy_accentuated, TechniqueFlag::HeavyAccentuated),
        (effect.accentuated, TechniqueFlag::Accentuated),
        (effect.ghost, TechniqueFlag::Ghost),
        (effect.hammer, TechniqueFlag::Hammer),
        (effect.slide, TechniqueFlag::Slide),
        (effect.vibrato, TechniqueFlag::Vibrato),
        (effect.dead, TechniqueFlag::Dead),
    ]
}

/// Map an effect bundle to annotations
///
/// Flags first, then bend, tremolo bar, grace and harmonic. Curves without
/// points are dropped.
pub fn annotate(effect: &NoteEffect) -> Vec<Annotation> {
    let mut annotations: Vec<Annotation> = technique_flags(effect)
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| Annotation::Flag(flag))
        .collect();

    if let Some(bend) = effect.bend.as_ref().filter(|b| !b.points.is_empty()) {
        annotations.push(Annotation::Bend(bend.points.clone()));
    }

    if let Some(bar) = effect.tremolo_bar.as_ref().filter(|b| !b.points.is_empty()) {
        annotations.push(Annotation::TremoloBar(bar.points.clone()));
    }

    if let Some(grace) = effect.grace {
        annotations.push(Annotation::Grace(GraceAnnotation {
            fret: grace.fret,
            duration: grace.duration,
            dynamic: grace.dynamic,
            transition: grace.transition,
            on_beat: grace.on_beat,
            dead: grace.dead,
        }));
    }

    if let Some(harmonic) = effect.harmonic {
        annotations.push(Annotation::Harmonic(HarmonicAnnotation {
            natural: harmonic.natural,
            pinched: harmonic.pinched,
            semi: harmonic.semi,
        }));
    }

    annotations
}

/// `<technical>` content of a tab-staff note
pub fn technical_for(note: &Note) -> Technical {
    Technical {
        fret: note.fret,
        string: note.string,
        velocity: note.velocity,
        annotations: note.effect.as_ref().map(annotate).unwrap_or_default(),
    }
}
