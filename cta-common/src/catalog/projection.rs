//! Relational-to-document projection
//!
//! Flattens the six archive tables into the ordered sequence of nested
//! [`CassetteSide`] documents. Deterministic: the same dataset always
//! yields the same sequence.
//!
//! Ordering:
//! - sides by (tape number, side letter)
//! - sessions by row id within a side
//! - tracks by (sequence order, row id) within a session
//! - credits by personnel name

use crate::catalog::document::{
    non_empty, CassetteSide, Session, SessionPersonnel, SideLetter, SideMetadata, Track,
    TrackCredit,
};
use crate::db::models::{CreditRow, CreditTarget, SessionRow, SideRow, TrackRow};
use crate::db::{Dataset, SideQueryVariant};
use crate::Result;
use sqlx::SqlitePool;
use tracing::debug;

const SIDES_WITH_HAS_AUDIO: &str = r#"
    SELECT
        s.id                  AS side_id,
        s.side_letter         AS side_letter,
        s.filename            AS filename,
        s.genre               AS genre,
        s.album_title         AS album_title,
        s.main_artist         AS main_artist,
        s.record_date_display AS record_date_display,
        s.audio_type          AS audio_type,
        s.dolby_setting       AS dolby_setting,
        s.tape_selector       AS tape_selector,
        s.library_catalog_no  AS library_catalog_no,
        COALESCE(s.has_audio, 1) AS has_audio,
        t.tape_number         AS tape_number
    FROM sides s
    JOIN tapes t ON t.id = s.tape_id
    ORDER BY t.tape_number, s.side_letter
"#;

const SIDES_LEGACY: &str = r#"
    SELECT
        s.id                  AS side_id,
        s.side_letter         AS side_letter,
        s.filename            AS filename,
        s.genre               AS genre,
        s.album_title         AS album_title,
        s.main_artist         AS main_artist,
        s.record_date_display AS record_date_display,
        s.audio_type          AS audio_type,
        s.dolby_setting       AS dolby_setting,
        s.tape_selector       AS tape_selector,
        s.library_catalog_no  AS library_catalog_no,
        t.tape_number         AS tape_number
    FROM sides s
    JOIN tapes t ON t.id = s.tape_id
    ORDER BY t.tape_number, s.side_letter
"#;

const SESSIONS_FOR_SIDE: &str =
    "SELECT id, session_code, session_date, location FROM sessions WHERE side_id = ? ORDER BY id";

const SESSION_CREDITS: &str = r#"
    SELECT
        p.name AS name,
        COALESCE(c.role, COALESCE(p.instrument_primary, '')) AS role,
        COALESCE(c.source_key, '') AS source_key,
        c.session_id AS session_id,
        c.track_id AS track_id
    FROM credits c
    JOIN personnel p ON p.id = c.personnel_id
    WHERE c.session_id = ? AND c.track_id IS NULL
    ORDER BY p.name
"#;

const TRACKS_FOR_SESSION: &str = r#"
    SELECT
        id AS track_id,
        sequence_order,
        title,
        counter_start,
        COALESCE(duration_min, 0) AS duration_min,
        COALESCE(duration_sec, 0) AS duration_sec,
        track_artist_display,
        vocalist_display,
        original_text_line
    FROM tracks
    WHERE session_id = ?
    ORDER BY sequence_order, id
"#;

const TRACK_CREDITS: &str = r#"
    SELECT
        p.name AS name,
        COALESCE(c.role, COALESCE(p.instrument_primary, '')) AS role,
        COALESCE(c.source_key, '') AS source_key,
        c.session_id AS session_id,
        c.track_id AS track_id
    FROM credits c
    JOIN personnel p ON p.id = c.personnel_id
    WHERE c.track_id = ?
    ORDER BY p.name
"#;

/// SQLite reports a missing column as "no such column: <name>"
fn is_unknown_column(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.message().contains("no such column"))
}

/// Project every side of the dataset
///
/// Returns the filtered sequence, possibly empty. Any query or mapping
/// failure is returned as an error; the caller decides about fallback.
pub async fn project_sides(dataset: &Dataset) -> Result<Vec<CassetteSide>> {
    let pool = dataset.pool();
    let side_rows = fetch_side_rows(dataset).await?;

    let mut sides = Vec::with_capacity(side_rows.len());
    for row in side_rows {
        let sessions = project_sessions(pool, row.side_id).await?;
        sides.push(side_document(row, sessions));
    }

    // Malformed joins: a side must identify both its tape and its file
    sides.retain(|side| !side.tape_number.is_empty() && !side.filename.is_empty());
    Ok(sides)
}

/// Run the side query, negotiating the `has_audio` column once per dataset
async fn fetch_side_rows(dataset: &Dataset) -> Result<Vec<SideRow>> {
    let pool = dataset.pool();

    match dataset.side_query() {
        Some(SideQueryVariant::WithHasAudio) => {
            return Ok(sqlx::query_as::<_, SideRow>(SIDES_WITH_HAS_AUDIO).fetch_all(pool).await?);
        }
        Some(SideQueryVariant::Legacy) => {
            return Ok(sqlx::query_as::<_, SideRow>(SIDES_LEGACY).fetch_all(pool).await?);
        }
        None => {}
    }

    match sqlx::query_as::<_, SideRow>(SIDES_WITH_HAS_AUDIO).fetch_all(pool).await {
        Ok(rows) => {
            debug!("Side query: has_audio column present");
            dataset.remember_side_query(SideQueryVariant::WithHasAudio);
            Ok(rows)
        }
        Err(e) if is_unknown_column(&e) => {
            debug!("Side query: has_audio column absent, using legacy query");
            let rows = sqlx::query_as::<_, SideRow>(SIDES_LEGACY).fetch_all(pool).await?;
            dataset.remember_side_query(SideQueryVariant::Legacy);
            Ok(rows)
        }
        Err(e) => Err(e.into()),
    }
}

fn side_document(row: SideRow, sessions: Vec<Session>) -> CassetteSide {
    CassetteSide {
        tape_number: row.tape_number.unwrap_or_default(),
        side_letter: SideLetter::from_raw(row.side_letter.as_deref()),
        filename: row.filename.unwrap_or_default(),
        has_audio: row.has_audio.map_or(true, |flag| flag != 0),
        metadata: SideMetadata {
            album_title: row.album_title.unwrap_or_default(),
            main_artist: row.main_artist.unwrap_or_default(),
            genre: row.genre.unwrap_or_default(),
            record_date_display: row.record_date_display.unwrap_or_default(),
            audio_type: row.audio_type.unwrap_or_default(),
            dolby: row.dolby_setting.unwrap_or_default(),
            tape_selector: row.tape_selector.unwrap_or_default(),
            catalog_number: row.library_catalog_no.unwrap_or_default(),
        },
        sessions,
    }
}

async fn project_sessions(pool: &SqlitePool, side_id: i64) -> Result<Vec<Session>> {
    let rows = sqlx::query_as::<_, SessionRow>(SESSIONS_FOR_SIDE)
        .bind(side_id)
        .fetch_all(pool)
        .await?;

    let mut sessions = Vec::with_capacity(rows.len());
    for row in rows {
        let session_personnel = session_personnel(pool, row.id).await?;
        let tracks = project_tracks(pool, row.id).await?;

        sessions.push(Session {
            session_code: row.session_code,
            session_date: non_empty(row.session_date),
            location: non_empty(row.location),
            session_personnel,
            tracks,
        });
    }
    Ok(sessions)
}

async fn session_personnel(pool: &SqlitePool, session_id: i64) -> Result<Vec<SessionPersonnel>> {
    let rows = sqlx::query_as::<_, CreditRow>(SESSION_CREDITS)
        .bind(session_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|row| row.target() == Some(CreditTarget::Session(session_id)))
        .map(|row| SessionPersonnel {
            name: row.name,
            role: row.role,
            source_key: row.source_key,
        })
        .collect())
}

async fn project_tracks(pool: &SqlitePool, session_id: i64) -> Result<Vec<Track>> {
    let rows = sqlx::query_as::<_, TrackRow>(TRACKS_FOR_SESSION)
        .bind(session_id)
        .fetch_all(pool)
        .await?;

    let mut tracks = Vec::with_capacity(rows.len());
    for row in rows {
        let credits = track_credits(pool, row.track_id).await?;

        tracks.push(Track {
            sequence: row.sequence_order.unwrap_or(0),
            counter_start: row.counter_start.unwrap_or(0),
            title: row.title.unwrap_or_default(),
            duration_min: row.duration_min,
            duration_sec: row.duration_sec,
            artist_display: non_empty(row.track_artist_display),
            vocalist_display: non_empty(row.vocalist_display),
            track_specific_credits: (!credits.is_empty()).then_some(credits),
            original_text: non_empty(row.original_text_line),
        });
    }
    Ok(tracks)
}

async fn track_credits(pool: &SqlitePool, track_id: i64) -> Result<Vec<TrackCredit>> {
    let rows = sqlx::query_as::<_, CreditRow>(TRACK_CREDITS)
        .bind(track_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|row| row.target() == Some(CreditTarget::Track(track_id)))
        .map(|row| TrackCredit {
            name: row.name,
            role: row.role,
        })
        .collect())
}
