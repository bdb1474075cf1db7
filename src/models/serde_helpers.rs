//! Serde helpers for lenient song JSON

use serde::de::{self, Deserialize, Deserializer};

use super::song::{Voice, MAX_VOICES};

/// Deserialize up to `MAX_VOICES` voices, filling the rest with empty voices
///
/// Producers that only use the first voice may send a one-element array.
pub fn pad_voices<'de, D>(deserializer: D) -> Result<[Voice; MAX_VOICES], D::Error>
where
    D: Deserializer<'de>,
{
    let voices = Vec::<Voice>::deserialize(deserializer)?;
    if voices.len() > MAX_VOICES {
        return Err(de::Error::invalid_length(voices.len(), &"at most two voices"));
    }
    let mut given = voices.into_iter();
    Ok(std::array::from_fn(|_| given.next().unwrap_or_default()))
}
