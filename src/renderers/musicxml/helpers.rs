//! Helper utilities for MusicXML export
//!
//! Contains the logging macro used across the MusicXML module.

/// Log a message for MusicXML export
pub fn log_musicxml(message: &str) {
    log::debug!("[MusicXML] {}", message);
}

/// Logging macro for MusicXML export
#[macro_export]
macro_rules! musicxml_log {
    ($($arg:tt)*) => {
        $crate::renderers::musicxml::helpers::log_musicxml(&format!($($arg)*));
    };
}
