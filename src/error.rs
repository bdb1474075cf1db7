//! Error types for MusicXML export
//!
//! Only malformed input and sink failures are errors. Absent optional data
//! (no bend, no marker, lyric list exhausted) is skipped where it is met.

use thiserror::Error;

/// Top-level export error type
#[derive(Debug, Error)]
pub enum ExportError {
    /// Duration class index outside whole..64th
    #[error("measure {measure}: duration class index {index} is outside 0..=6")]
    InvalidDurationClass { measure: u32, index: u8 },

    /// Tuplet ratio with a zero term, or a length that overflows `u32` ticks
    #[error("measure {measure}: invalid division ratio {enters}/{times}")]
    InvalidDivision { measure: u32, enters: u32, times: u32 },

    /// Voice index beyond the fixed voice count
    #[error("voice index {index} is out of range (max {max})")]
    VoiceOutOfRange { index: usize, max: usize },

    /// A note references a string the track does not define
    #[error("measure {measure}: note references unknown string {string}")]
    UnknownString { measure: u32, string: u8 },

    /// Time signature with a zero denominator, or a measure too long for `u32` ticks
    #[error("measure {measure}: time signature has no length in ticks")]
    InvalidTimeSignature { measure: u32 },

    /// A beat whose start plus length passes the tick range
    #[error("measure {measure}: beat at tick {start} ends past the tick range")]
    BeatOutOfRange { measure: u32, start: u32 },

    /// Writing the rendered document to the sink failed
    #[error("could not write MusicXML document: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
