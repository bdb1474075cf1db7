//! MusicXML export module
//!
//! Exports a guitar tablature [`Song`](crate::models::Song) as a MusicXML
//! partwise document with a standard staff and a tab staff per track.
//!
//! # Module Structure
//!
//! - **converter**: Entry points (`to_musicxml()`, `write_song()`, `encode_song()`)
//! - **measure**: Measure encoding (header elements, voice passes, tab layers)
//! - **timeline**: Per-voice pass over a measure's beats (rests, backups)
//! - **chord**: Notes of one beat, single or chord
//! - **attributes**: Attribute change detection, clefs, tuning
//! - **effects**: Note effects to technical annotations
//! - **lyrics**: Lyric segmentation and attachment
//! - **duration**: Duration class to ticks/type/dots/tuplet
//! - **pitch**: Key signature and pitch naming
//! - **settings**: Export settings
//! - **emitter**: MusicXML document emitter (consumes IR from `crate::ir`)
//! - **builder**: XML text writer
//! - **helpers**: Logging

pub mod attributes;
pub mod builder;
pub mod chord;
pub mod converter;
pub mod duration;
pub mod effects;
pub mod emitter;
pub mod helpers;
pub mod lyrics;
pub mod measure;
pub mod pitch;
pub mod settings;
pub mod timeline;

pub use converter::{encode_song, encode_track, to_musicxml, write_song};
pub use duration::encode_duration;
pub use emitter::emit_musicxml;
pub use helpers::log_musicxml;
pub use pitch::{key_fifths, pitch_name};
pub use settings::{ChordStyle, ExportSettings};
