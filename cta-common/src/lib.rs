//! # Cassette Tape Archive Common Library
//!
//! Shared code for the cassette archive catalog:
//! - Relational schema contract and read-only dataset handle
//! - Projection of the relational dataset into nested side documents
//! - Built-in fallback catalog
//! - Read-time folds for the collection grid and personnel views
//! - Playback state mirror and audio asset resolution
//! - Configuration loading

pub mod audio;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod human_time;
pub mod player;

pub use catalog::{Catalog, CatalogOrigin, CassetteSide};
pub use error::{Error, Result};
