//! Personnel discography fold
//!
//! Aggregates, across every side, each session where a name appears in
//! `session_personnel`. A session-level credit applies to every track of
//! that session, so each of those tracks is an appearance whether or not
//! the person has a track-specific credit on it.

use crate::catalog::document::{CassetteSide, SideLetter};
use crate::human_time::format_duration;
use serde::Serialize;
use std::collections::HashSet;

/// Role held in one session, with its legend key (may be empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditedRole {
    pub role: String,
    pub source_key: String,
}

/// One track the person played on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearance {
    pub tape_number: String,
    pub side_letter: SideLetter,
    pub filename: String,
    pub album_title: String,
    pub session_index: usize,
    pub session_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub sequence: i64,
    pub title: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocalist_display: Option<String>,
    /// Roles held in the session this track belongs to
    pub roles: Vec<CreditedRole>,
}

/// Appearances sharing one album title
///
/// Album-level fields and roles are taken from the first appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumAppearances {
    pub album_title: String,
    pub main_artist: String,
    pub genre: String,
    pub record_date_display: String,
    pub catalog_number: String,
    pub roles: Vec<CreditedRole>,
    pub appearances: Vec<Appearance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discography {
    pub name: String,
    /// Distinct roles in first-seen order
    pub roles: Vec<String>,
    pub total_tracks: usize,
    pub unique_sides: usize,
    pub unique_albums: usize,
    pub albums: Vec<AlbumAppearances>,
}

/// Aggregate everything `name` appears on
///
/// Returns `None` when the name is not listed in any session. Matching is
/// exact, as names are unique in the dataset.
pub fn discography(sides: &[CassetteSide], name: &str) -> Option<Discography> {
    let mut found = false;
    let mut roles: Vec<String> = Vec::new();
    let mut appearances: Vec<(&CassetteSide, Appearance)> = Vec::new();

    for side in sides {
        for (session_index, session) in side.sessions.iter().enumerate() {
            let session_roles: Vec<CreditedRole> = session
                .session_personnel
                .iter()
                .filter(|p| p.name == name)
                .map(|p| CreditedRole {
                    role: p.role.clone(),
                    source_key: p.source_key.clone(),
                })
                .collect();
            if session_roles.is_empty() {
                continue;
            }
            found = true;

            for credited in &session_roles {
                if !roles.contains(&credited.role) {
                    roles.push(credited.role.clone());
                }
            }

            for track in &session.tracks {
                appearances.push((
                    side,
                    Appearance {
                        tape_number: side.tape_number.clone(),
                        side_letter: side.side_letter,
                        filename: side.filename.clone(),
                        album_title: side.metadata.album_title.clone(),
                        session_index,
                        session_code: session.session_code.clone(),
                        location: session.location.clone(),
                        sequence: track.sequence,
                        title: track.title.clone(),
                        duration: format_duration(track.duration_min, track.duration_sec),
                        vocalist_display: track.vocalist_display.clone(),
                        roles: session_roles.clone(),
                    },
                ));
            }
        }
    }

    if !found {
        return None;
    }

    let unique_sides = appearances
        .iter()
        .map(|(side, _)| side.filename.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_tracks = appearances.len();

    let mut albums: Vec<AlbumAppearances> = Vec::new();
    for (side, appearance) in appearances {
        match albums
            .iter_mut()
            .find(|album| album.album_title == appearance.album_title)
        {
            Some(album) => album.appearances.push(appearance),
            None => albums.push(AlbumAppearances {
                album_title: side.metadata.album_title.clone(),
                main_artist: side.metadata.main_artist.clone(),
                genre: side.metadata.genre.clone(),
                record_date_display: side.metadata.record_date_display.clone(),
                catalog_number: side.metadata.catalog_number.clone(),
                roles: appearance.roles.clone(),
                appearances: vec![appearance],
            }),
        }
    }

    Some(Discography {
        name: name.to_string(),
        roles,
        total_tracks,
        unique_sides,
        unique_albums: albums.len(),
        albums,
    })
}

/// Every session personnel name, sorted and distinct
pub fn personnel_names(sides: &[CassetteSide]) -> Vec<String> {
    let mut names: Vec<String> = sides
        .iter()
        .flat_map(|side| side.sessions.iter())
        .flat_map(|session| session.session_personnel.iter())
        .map(|p| p.name.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}
