//! Export operations for the WASM API
//!
//! - MusicXML: the partwise document for a song
//! - IR JSON: the encoded measure tree, for inspection/debugging

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, deserialize_or_default, export_error};
use crate::models::Song;
use crate::renderers::musicxml::{encode_song, to_musicxml, ExportSettings};
use crate::{wasm_info, wasm_log};

/// Export a song to MusicXML
///
/// `settings` may be omitted; missing fields take their defaults.
#[wasm_bindgen(js_name = exportSongMusicXML)]
pub fn export_song_musicxml(song: JsValue, settings: JsValue) -> Result<String, JsValue> {
    wasm_info!("exportSongMusicXML called");

    let song: Song = deserialize(song, "Invalid song")?;
    let settings: ExportSettings = deserialize_or_default(settings, "Invalid export settings")?;
    wasm_log!("  Song '{}' has {} tracks", song.name, song.tracks.len());

    let musicxml = to_musicxml(&song, &settings).map_err(|e| export_error("MusicXML export error", e))?;

    wasm_info!("  MusicXML generated: {} bytes", musicxml.len());
    Ok(musicxml)
}

/// Encode a song and return the descriptor tree as pretty JSON
#[wasm_bindgen(js_name = encodeSongIRJson)]
pub fn encode_song_ir_json(song: JsValue, settings: JsValue) -> Result<String, JsValue> {
    wasm_info!("encodeSongIRJson called");

    let song: Song = deserialize(song, "Invalid song")?;
    let settings: ExportSettings = deserialize_or_default(settings, "Invalid export settings")?;

    let score = encode_song(&song, &settings).map_err(|e| export_error("MusicXML export error", e))?;
    let json = serde_json::to_string_pretty(&score).map_err(|e| export_error("JSON serialization error", e))?;

    wasm_info!("  IR JSON generated: {} bytes", json.len());
    Ok(json)
}
