//! Audio asset resolution

use serde::{Deserialize, Serialize};

/// Where digitized side recordings are served from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// URL prefix or path of the audio directory
    pub base_location: String,
    /// File extension without the dot
    pub extension: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            base_location: "/audio".to_string(),
            extension: "mp3".to_string(),
        }
    }
}

impl AudioSettings {
    pub fn url_for(&self, filename: &str) -> String {
        asset_url(&self.base_location, filename, &self.extension)
    }
}

/// `{base_location}/{filename}.{extension}`, with trailing `/` trimmed from the base
///
/// # Examples
///
/// ```
/// use cta_common::audio::asset_url;
///
/// assert_eq!(asset_url("/audio/", "Tape013A", "mp3"), "/audio/Tape013A.mp3");
/// assert_eq!(asset_url("https://cdn.example/tapes", "Tape089B", "ogg"),
///            "https://cdn.example/tapes/Tape089B.ogg");
/// ```
pub fn asset_url(base_location: &str, filename: &str, extension: &str) -> String {
    format!(
        "{}/{}.{}",
        base_location.trim_end_matches('/'),
        filename,
        extension
    )
}
