//! Guitar Tablature MusicXML Export
//!
//! Converts a tablature song model (tracks of measures of two-voice beats)
//! into a MusicXML partwise document. Usable as a Rust library or as a WASM
//! module through [`api`].

pub mod error;
pub mod models;
pub mod ir;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use error::{ExportError, Result};
pub use models::*;
pub use renderers::musicxml::{to_musicxml, write_song, ChordStyle, ExportSettings};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (module re-instantiated) keeps the existing logger
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Tab MusicXML WASM module initialized");
}
