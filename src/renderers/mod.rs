//! Renderers module
//!
//! Export logic turning the song model into output formats.

pub mod musicxml;

pub use musicxml::*;
