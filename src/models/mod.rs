//! Song model consumed by the exporter
//!
//! Song → tracks → measures → beats → per-voice notes.

pub mod duration;
pub mod effects;
pub mod lyrics;
pub mod serde_helpers;
pub mod song;

pub use duration::*;
pub use effects::*;
pub use lyrics::*;
pub use song::*;
