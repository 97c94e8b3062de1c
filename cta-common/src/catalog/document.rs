//! Nested catalog documents
//!
//! The shape handed to the presentation layer: side, then sessions, then
//! tracks. Optional attributes are omitted from the JSON form when absent,
//! so a track without track-specific credits has no
//! `track_specific_credits` key at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cassette side letter
///
/// Strictly two-valued. Anything other than `"B"` reads as `A`; this
/// mirrors the archive data as it stands and may hide unusual letters in
/// the source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SideLetter {
    A,
    B,
}

impl SideLetter {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("B") => SideLetter::B,
            _ => SideLetter::A,
        }
    }
}

impl fmt::Display for SideLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideLetter::A => write!(f, "A"),
            SideLetter::B => write!(f, "B"),
        }
    }
}

/// One digitized cassette side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CassetteSide {
    pub tape_number: String,
    pub side_letter: SideLetter,
    pub filename: String,
    #[serde(default = "default_has_audio")]
    pub has_audio: bool,
    pub metadata: SideMetadata,
    pub sessions: Vec<Session>,
}

fn default_has_audio() -> bool {
    true
}

impl CassetteSide {
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.sessions.iter().flat_map(|session| session.tracks.iter())
    }

    pub fn track_count(&self) -> usize {
        self.sessions.iter().map(|session| session.tracks.len()).sum()
    }
}

/// Album-level metadata from the side header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideMetadata {
    pub album_title: String,
    pub main_artist: String,
    pub genre: String,
    pub record_date_display: String,
    pub audio_type: String,
    pub dolby: String,
    pub tape_selector: String,
    pub catalog_number: String,
}

/// Recording session within a side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub session_personnel: Vec<SessionPersonnel>,
    pub tracks: Vec<Track>,
}

/// Personnel credited for a whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPersonnel {
    pub name: String,
    pub role: String,
    /// Legend key from the source document ("a", "LA", "3"), or empty
    pub source_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub sequence: i64,
    /// Tape counter reading at the start of the track
    pub counter_start: i64,
    pub title: String,
    pub duration_min: i64,
    pub duration_sec: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocalist_display: Option<String>,
    /// `None` means "no track-specific credits"; never `Some(vec![])` from a projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_specific_credits: Option<Vec<TrackCredit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackCredit {
    pub name: String,
    pub role: String,
}

/// Treat empty text as absent
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(credits: Option<Vec<TrackCredit>>) -> Track {
        Track {
            sequence: 1,
            counter_start: 0,
            title: "Mule Skinner Blues".into(),
            duration_min: 2,
            duration_sec: 48,
            artist_display: None,
            vocalist_display: None,
            track_specific_credits: credits,
            original_text: None,
        }
    }

    #[test]
    fn test_side_letter_collapse() {
        assert_eq!(SideLetter::from_raw(Some("B")), SideLetter::B);
        assert_eq!(SideLetter::from_raw(Some("A")), SideLetter::A);
        assert_eq!(SideLetter::from_raw(Some("b")), SideLetter::A);
        assert_eq!(SideLetter::from_raw(Some("C")), SideLetter::A);
        assert_eq!(SideLetter::from_raw(None), SideLetter::A);
    }

    #[test]
    fn test_absent_track_credits_omitted() {
        let json = serde_json::to_value(track(None)).unwrap();
        assert!(json.get("track_specific_credits").is_none());
        assert!(json.get("vocalist_display").is_none());

        let json = serde_json::to_value(track(Some(vec![]))).unwrap();
        assert_eq!(json["track_specific_credits"], json!([]));
    }

    #[test]
    fn test_session_code_serialized_as_null() {
        let session = Session {
            session_code: None,
            session_date: None,
            location: Some("Village Vanguard, New York City".into()),
            session_personnel: vec![],
            tracks: vec![],
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["session_code"], serde_json::Value::Null);
        assert!(json.get("session_date").is_none());
        assert_eq!(json["location"], "Village Vanguard, New York City");
    }

    #[test]
    fn test_has_audio_defaults_when_missing() {
        let side: CassetteSide = serde_json::from_value(json!({
            "tape_number": "013",
            "side_letter": "A",
            "filename": "Tape013A",
            "metadata": {
                "album_title": "", "main_artist": "", "genre": "",
                "record_date_display": "", "audio_type": "", "dolby": "",
                "tape_selector": "", "catalog_number": ""
            },
            "sessions": []
        }))
        .unwrap();
        assert!(side.has_audio);
    }
}
