//! Relational schema of the cassette archive
//!
//! Six tables, owned top-down: tapes own sides, sides own sessions,
//! sessions own tracks. Credits link one personnel entry to either a
//! session or a track. Every parent removal cascades.

use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

const CREATE_TAPES: &str = r#"
    CREATE TABLE IF NOT EXISTS tapes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tape_number TEXT NOT NULL UNIQUE,
        recorder_model TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        notes TEXT
    )
"#;

const CREATE_SIDES: &str = r#"
    CREATE TABLE IF NOT EXISTS sides (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tape_id INTEGER NOT NULL,
        side_letter TEXT NOT NULL,
        filename TEXT UNIQUE,
        genre TEXT,
        album_title TEXT,
        main_artist TEXT,
        record_date_display TEXT,
        audio_type TEXT,
        library_catalog_no TEXT,
        dolby_setting TEXT,
        tape_selector TEXT,
        raw_header_json TEXT,
        FOREIGN KEY (tape_id) REFERENCES tapes(id) ON DELETE CASCADE
    )
"#;

const CREATE_SESSIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        side_id INTEGER NOT NULL,
        session_code TEXT,
        session_date TEXT,
        location TEXT,
        notes TEXT,
        FOREIGN KEY (side_id) REFERENCES sides(id) ON DELETE CASCADE
    )
"#;

const CREATE_TRACKS: &str = r#"
    CREATE TABLE IF NOT EXISTS tracks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        session_id INTEGER NOT NULL,
        sequence_order INTEGER,
        title TEXT,
        counter_start INTEGER,
        duration_min INTEGER,
        duration_sec INTEGER,
        track_artist_display TEXT,
        vocalist_display TEXT,
        is_instrumental INTEGER DEFAULT 0,
        original_text_line TEXT,
        FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE
    )
"#;

const CREATE_PERSONNEL: &str = r#"
    CREATE TABLE IF NOT EXISTS personnel (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        normalized_name TEXT,
        instrument_primary TEXT
    )
"#;

const CREATE_CREDITS: &str = r#"
    CREATE TABLE IF NOT EXISTS credits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        personnel_id INTEGER NOT NULL,
        session_id INTEGER,
        track_id INTEGER,
        role TEXT,
        source_key TEXT,
        FOREIGN KEY (personnel_id) REFERENCES personnel(id) ON DELETE CASCADE,
        FOREIGN KEY (session_id) REFERENCES sessions(id) ON DELETE CASCADE,
        FOREIGN KEY (track_id) REFERENCES tracks(id) ON DELETE CASCADE,
        CHECK (session_id IS NOT NULL OR track_id IS NOT NULL)
    )
"#;

const CREATE_INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_sides_tape ON sides(tape_id)",
    "CREATE INDEX IF NOT EXISTS idx_tracks_session ON tracks(session_id)",
    "CREATE INDEX IF NOT EXISTS idx_credits_personnel ON credits(personnel_id)",
    "CREATE INDEX IF NOT EXISTS idx_credits_track ON credits(track_id)",
];

/// Create the base schema (first published version, without optional columns)
///
/// Idempotent. Call [`crate::db::sync_all_table_schemas`] afterwards to
/// add the optional columns of later versions.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    for ddl in [
        CREATE_TAPES,
        CREATE_SIDES,
        CREATE_SESSIONS,
        CREATE_TRACKS,
        CREATE_PERSONNEL,
        CREATE_CREDITS,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in CREATE_INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Schema created: tapes, sides, sessions, tracks, personnel, credits");
    Ok(())
}
