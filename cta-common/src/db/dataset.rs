//! Read-only dataset handle
//!
//! A dataset arrives as an opaque byte buffer (a serialized SQLite
//! database). It is materialised to a private temporary file and opened
//! read-only; nothing in this crate writes through a `Dataset`.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::io::Write;
use std::sync::OnceLock;
use tempfile::NamedTempFile;
use tracing::debug;

/// Every SQLite database file starts with this header
const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Which side query the dataset answered
///
/// Newer datasets carry `sides.has_audio`; older ones do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideQueryVariant {
    WithHasAudio,
    Legacy,
}

/// Opened relational dataset
pub struct Dataset {
    pool: SqlitePool,
    side_query: OnceLock<SideQueryVariant>,
    // Keeps the backing file alive for the lifetime of the pool
    _file: NamedTempFile,
}

impl Dataset {
    /// Open a dataset from its serialized bytes
    ///
    /// Fails with [`Error::InvalidDataset`] for an empty or non-SQLite buffer
    /// and with [`Error::Database`] when the engine cannot read the file.
    pub async fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::InvalidDataset("empty buffer".to_string()));
        }
        if bytes.len() < SQLITE_HEADER.len() || &bytes[..SQLITE_HEADER.len()] != SQLITE_HEADER {
            return Err(Error::InvalidDataset(format!(
                "missing SQLite header ({} bytes)",
                bytes.len()
            )));
        }

        let mut file = NamedTempFile::new()?;
        file.write_all(bytes)?;
        file.flush()?;

        let options = SqliteConnectOptions::new()
            .filename(file.path())
            .read_only(true)
            .immutable(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        // Opening is lazy in SQLite; a corrupt file only shows on first read
        let table_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&pool)
            .await?;
        debug!(
            "Opened dataset ({} bytes, {} schema objects)",
            bytes.len(),
            table_count
        );

        Ok(Self {
            pool,
            side_query: OnceLock::new(),
            _file: file,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Side query variant that succeeded earlier on this dataset, if any
    pub fn side_query(&self) -> Option<SideQueryVariant> {
        self.side_query.get().copied()
    }

    /// Remember the side query variant for the rest of the session
    pub(crate) fn remember_side_query(&self, variant: SideQueryVariant) {
        // First successful variant wins
        let _ = self.side_query.set(variant);
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
