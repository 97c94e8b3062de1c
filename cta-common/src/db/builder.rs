//! Dataset authoring
//!
//! Writes a fresh dataset file with the archive schema and typed inserts.
//! Used by the schema bootstrap command and by tests; the catalog itself
//! only ever reads datasets.

use crate::db::models::{CreditTarget, NewSession, NewSide, NewTrack};
use crate::db::schema::create_schema;
use crate::db::schema_sync::SchemaIntrospector;
use crate::db::table_schemas::sync_all_table_schemas;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::info;

/// Builds a dataset file row by row
pub struct DatasetBuilder {
    pool: SqlitePool,
    path: PathBuf,
    has_audio_column: bool,
    // Present when the builder owns a scratch directory
    _dir: Option<TempDir>,
}

impl DatasetBuilder {
    /// Scratch dataset with the current schema (including `sides.has_audio`)
    pub async fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cassette_library.db");
        Self::open(path, Some(dir), true).await
    }

    /// Scratch dataset with the first schema version (no `sides.has_audio`)
    pub async fn legacy() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cassette_library.db");
        Self::open(path, Some(dir), false).await
    }

    /// Dataset file at `path` with the current schema
    ///
    /// An existing file is opened and upgraded in place.
    pub async fn create_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::open(path.to_path_buf(), None, true).await
    }

    async fn open(path: PathBuf, dir: Option<TempDir>, current_schema: bool) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        create_schema(&pool).await?;
        if current_schema {
            sync_all_table_schemas(&pool).await?;
        }
        let has_audio_column = SchemaIntrospector::has_column(&pool, "sides", "has_audio").await?;

        Ok(Self {
            pool,
            path,
            has_audio_column,
            _dir: dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn tape(&self, tape_number: &str, recorder_model: Option<&str>) -> Result<i64> {
        let result = sqlx::query("INSERT INTO tapes (tape_number, recorder_model) VALUES (?, ?)")
            .bind(tape_number)
            .bind(recorder_model)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn side(&self, tape_id: i64, side: NewSide) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO sides (
                tape_id, side_letter, filename, genre, album_title, main_artist,
                record_date_display, audio_type, library_catalog_no,
                dolby_setting, tape_selector, raw_header_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(tape_id)
        .bind(&side.side_letter)
        .bind(&side.filename)
        .bind(&side.genre)
        .bind(&side.album_title)
        .bind(&side.main_artist)
        .bind(&side.record_date_display)
        .bind(&side.audio_type)
        .bind(&side.library_catalog_no)
        .bind(&side.dolby_setting)
        .bind(&side.tape_selector)
        .bind(&side.raw_header_json)
        .execute(&self.pool)
        .await?;
        let side_id = result.last_insert_rowid();

        if let (true, Some(has_audio)) = (self.has_audio_column, side.has_audio) {
            sqlx::query("UPDATE sides SET has_audio = ? WHERE id = ?")
                .bind(i64::from(has_audio))
                .bind(side_id)
                .execute(&self.pool)
                .await?;
        }

        Ok(side_id)
    }

    pub async fn session(&self, side_id: i64, session: NewSession) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO sessions (side_id, session_code, session_date, location, notes) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(side_id)
        .bind(&session.session_code)
        .bind(&session.session_date)
        .bind(&session.location)
        .bind(&session.notes)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn track(&self, session_id: i64, track: NewTrack) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO tracks (
                session_id, sequence_order, title, counter_start, duration_min, duration_sec,
                track_artist_display, vocalist_display, is_instrumental, original_text_line
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session_id)
        .bind(track.sequence_order)
        .bind(&track.title)
        .bind(track.counter_start)
        .bind(track.duration_min)
        .bind(track.duration_sec)
        .bind(&track.track_artist_display)
        .bind(&track.vocalist_display)
        .bind(track.is_instrumental)
        .bind(&track.original_text_line)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn personnel(&self, name: &str, instrument_primary: Option<&str>) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO personnel (name, normalized_name, instrument_primary) VALUES (?, ?, ?)",
        )
        .bind(name)
        .bind(normalized_name(name))
        .bind(instrument_primary)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn credit(
        &self,
        personnel_id: i64,
        target: CreditTarget,
        role: Option<&str>,
        source_key: Option<&str>,
    ) -> Result<i64> {
        let (session_id, track_id) = target.columns();
        let result = sqlx::query(
            "INSERT INTO credits (personnel_id, session_id, track_id, role, source_key) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(personnel_id)
        .bind(session_id)
        .bind(track_id)
        .bind(role)
        .bind(source_key)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Close the dataset and return its serialized bytes
    pub async fn finish(self) -> Result<Vec<u8>> {
        self.pool.close().await;
        let bytes = tokio::fs::read(&self.path).await?;
        info!("Dataset written: {} ({} bytes)", self.path.display(), bytes.len());
        Ok(bytes)
    }
}

/// Sort form of a personal name: "Earl Scruggs" -> "Scruggs, Earl"
pub fn normalized_name(name: &str) -> String {
    let name = name.trim();
    match name.rsplit_once(' ') {
        Some((given, family)) if !given.is_empty() => format!("{}, {}", family, given),
        _ => name.to_string(),
    }
}
