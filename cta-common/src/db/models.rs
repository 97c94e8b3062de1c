//! Database models
//!
//! Row shapes read by the projection queries, the credit association and
//! the insert payloads used when authoring datasets.

use serde::{Deserialize, Serialize};

/// Side joined with its parent tape
///
/// `has_audio` is absent when the dataset predates that column.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SideRow {
    pub side_id: i64,
    pub side_letter: Option<String>,
    pub filename: Option<String>,
    pub genre: Option<String>,
    pub album_title: Option<String>,
    pub main_artist: Option<String>,
    pub record_date_display: Option<String>,
    pub audio_type: Option<String>,
    pub dolby_setting: Option<String>,
    pub tape_selector: Option<String>,
    pub library_catalog_no: Option<String>,
    #[sqlx(default)]
    pub has_audio: Option<i64>,
    pub tape_number: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    pub id: i64,
    pub session_code: Option<String>,
    pub session_date: Option<String>,
    pub location: Option<String>,
}

/// Track with duration fields already defaulted to 0
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackRow {
    pub track_id: i64,
    pub sequence_order: Option<i64>,
    pub title: Option<String>,
    pub counter_start: Option<i64>,
    pub duration_min: i64,
    pub duration_sec: i64,
    pub track_artist_display: Option<String>,
    pub vocalist_display: Option<String>,
    pub original_text_line: Option<String>,
}

/// Credit joined with its personnel entry, role and source key already defaulted
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CreditRow {
    pub name: String,
    pub role: String,
    pub source_key: String,
    pub session_id: Option<i64>,
    pub track_id: Option<i64>,
}

impl CreditRow {
    pub fn target(&self) -> Option<CreditTarget> {
        CreditTarget::from_columns(self.session_id, self.track_id)
    }
}

/// What a credit is attached to
///
/// Exactly one of a session or a track. The storage form is two nullable
/// foreign keys; readers convert through [`CreditTarget::from_columns`] so
/// that a credit is never attributed to both or to neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum CreditTarget {
    Session(i64),
    Track(i64),
}

impl CreditTarget {
    /// Classify the stored foreign keys
    ///
    /// A track reference wins: such a row is returned by the track-scoped
    /// credit lookup and excluded from the session-scoped one.
    pub fn from_columns(session_id: Option<i64>, track_id: Option<i64>) -> Option<Self> {
        match (session_id, track_id) {
            (_, Some(track_id)) => Some(CreditTarget::Track(track_id)),
            (Some(session_id), None) => Some(CreditTarget::Session(session_id)),
            (None, None) => None,
        }
    }

    /// Foreign key columns as stored: (session_id, track_id)
    pub fn columns(&self) -> (Option<i64>, Option<i64>) {
        match *self {
            CreditTarget::Session(id) => (Some(id), None),
            CreditTarget::Track(id) => (None, Some(id)),
        }
    }
}

/// Side insert payload
#[derive(Debug, Clone, Default)]
pub struct NewSide {
    pub side_letter: String,
    pub filename: String,
    pub genre: Option<String>,
    pub album_title: Option<String>,
    pub main_artist: Option<String>,
    pub record_date_display: Option<String>,
    pub audio_type: Option<String>,
    pub library_catalog_no: Option<String>,
    pub dolby_setting: Option<String>,
    pub tape_selector: Option<String>,
    pub raw_header_json: Option<String>,
    /// Ignored by datasets without the `has_audio` column
    pub has_audio: Option<bool>,
}

/// Session insert payload
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub session_code: Option<String>,
    pub session_date: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Track insert payload
#[derive(Debug, Clone, Default)]
pub struct NewTrack {
    pub sequence_order: Option<i64>,
    pub title: Option<String>,
    pub counter_start: Option<i64>,
    pub duration_min: Option<i64>,
    pub duration_sec: Option<i64>,
    pub track_artist_display: Option<String>,
    pub vocalist_display: Option<String>,
    pub is_instrumental: bool,
    pub original_text_line: Option<String>,
}
