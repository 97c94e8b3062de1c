//! Collection grid fold
//!
//! Summaries for the grid view and lookup for the side-detail view. Pure
//! reads over the projected sides; no dataset access.

use crate::catalog::document::{CassetteSide, SideLetter};
use crate::human_time::{format_seconds, total_seconds};
use serde::Serialize;

/// One grid tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideSummary {
    pub tape_number: String,
    pub side_letter: SideLetter,
    pub filename: String,
    pub has_audio: bool,
    pub album_title: String,
    pub main_artist: String,
    pub genre: String,
    pub record_date_display: String,
    pub tape_selector: String,
    pub track_count: usize,
    pub session_count: usize,
    pub total_seconds: i64,
    /// `M:SS` rendering of `total_seconds`
    pub total_duration: String,
}

impl From<&CassetteSide> for SideSummary {
    fn from(side: &CassetteSide) -> Self {
        let seconds = total_seconds(side);
        Self {
            tape_number: side.tape_number.clone(),
            side_letter: side.side_letter,
            filename: side.filename.clone(),
            has_audio: side.has_audio,
            album_title: side.metadata.album_title.clone(),
            main_artist: side.metadata.main_artist.clone(),
            genre: side.metadata.genre.clone(),
            record_date_display: side.metadata.record_date_display.clone(),
            tape_selector: side.metadata.tape_selector.clone(),
            track_count: side.track_count(),
            session_count: side.sessions.len(),
            total_seconds: seconds,
            total_duration: format_seconds(seconds),
        }
    }
}

/// Sides shown in the grid, in catalog order
pub fn visible_sides(sides: &[CassetteSide], only_with_audio: bool) -> Vec<&CassetteSide> {
    sides
        .iter()
        .filter(|side| !only_with_audio || side.has_audio)
        .collect()
}

/// Side with this filename (filenames are unique)
pub fn find_side<'a>(sides: &'a [CassetteSide], filename: &str) -> Option<&'a CassetteSide> {
    sides.iter().find(|side| side.filename == filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback::fallback_sides;

    #[test]
    fn test_visible_sides_filter() {
        let mut sides = fallback_sides();
        sides[1].has_audio = false;

        assert_eq!(visible_sides(&sides, false).len(), 6);

        let with_audio = visible_sides(&sides, true);
        assert_eq!(with_audio.len(), 5);
        assert!(with_audio.iter().all(|s| s.filename != "Tape013B"));
        assert_eq!(with_audio[0].filename, "Tape013A");
        assert_eq!(with_audio[1].filename, "Tape027A");
    }

    #[test]
    fn test_summary_totals() {
        let sides = fallback_sides();
        let summary = SideSummary::from(&sides[0]);

        assert_eq!(summary.filename, "Tape013A");
        assert_eq!(summary.session_count, 2);
        assert_eq!(summary.track_count, 5);
        // 2:48 + 2:52 + 3:15 + 2:35 + 3:08
        assert_eq!(summary.total_seconds, 878);
        assert_eq!(summary.total_duration, "14:38");
        assert_eq!(summary.album_title, "The Best of Bluegrass 1940-1941");
    }

    #[test]
    fn test_find_side() {
        let sides = fallback_sides();
        let side = find_side(&sides, "Tape042A").unwrap();
        assert_eq!(side.metadata.main_artist, "John Coltrane Quartet");
        assert!(find_side(&sides, "Tape999A").is_none());
        assert!(find_side(&sides, "tape042a").is_none());
    }
}
