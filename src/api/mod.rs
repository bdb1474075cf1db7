//! JavaScript-facing API
//!
//! - `helpers`: console logging macros and JS value conversion
//! - `export`: song export entry points

pub mod helpers;
pub mod export;

pub use export::{encode_song_ir_json, export_song_musicxml};
