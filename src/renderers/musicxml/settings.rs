//! Export configuration

use serde::{Deserialize, Serialize};

use crate::models::QUARTER_TIME;

/// How simultaneous notes of a beat are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordStyle {
    /// `<chord stroke=".." value="..">` wrapping the notes
    #[default]
    Grouped,
    /// MusicXML `<chord/>` on every note after the first
    Native,
}

/// Configuration options for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Ticks per quarter note written to `<divisions>`
    pub divisions: u32,

    /// `score-partwise` version attribute
    pub version: String,

    /// `<encoding><software>` text
    pub software: String,

    pub chord_style: ChordStyle,

    /// Whether to write the partwise DOCTYPE declaration
    pub include_doctype: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            divisions: QUARTER_TIME,
            version: "4.0".to_string(),
            software: format!("tab-musicxml {}", env!("CARGO_PKG_VERSION")),
            chord_style: ChordStyle::Grouped,
            include_doctype: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: ExportSettings =
            serde_json::from_str(r#"{"chord_style": "native"}"#).unwrap();
        assert_eq!(settings.chord_style, ChordStyle::Native);
        assert_eq!(settings.divisions, 960);
        assert_eq!(settings.version, "4.0");
        assert!(settings.include_doctype);
    }
}
