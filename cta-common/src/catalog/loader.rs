//! Catalog loading
//!
//! Retrieval of the dataset bytes, the single fallback decision point,
//! and the process-wide catalog that is loaded once and never reloaded.

use crate::catalog::document::CassetteSide;
use crate::catalog::fallback::fallback_sides;
use crate::catalog::projection::project_sides;
use crate::db::Dataset;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Where the dataset bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Http(String),
}

impl DatasetSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Http(location.to_string())
        } else {
            DatasetSource::File(PathBuf::from(location))
        }
    }

    /// Obtain the serialized dataset
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DatasetSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                Error::Retrieval(format!("Failed to read {}: {}", path.display(), e))
            }),
            DatasetSource::Http(url) => {
                let response = reqwest::get(url)
                    .await
                    .map_err(|e| Error::Retrieval(format!("Failed to fetch {}: {}", url, e)))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Retrieval(format!(
                        "Failed to fetch database: {}",
                        status.as_u16()
                    )));
                }
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| Error::Retrieval(format!("Failed to read body of {}: {}", url, e)))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Http(url) => write!(f, "{}", url),
        }
    }
}

/// Why the built-in catalog is being served
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Dataset bytes could not be obtained
    Retrieval(String),
    /// Bytes were obtained but the engine could not open them
    Open(String),
    /// A query or row mapping failed
    Query(String),
    /// Projection succeeded with zero sides
    Empty,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Retrieval(msg) => write!(f, "dataset retrieval failed: {}", msg),
            FallbackReason::Open(msg) => write!(f, "dataset could not be opened: {}", msg),
            FallbackReason::Query(msg) => write!(f, "dataset projection failed: {}", msg),
            FallbackReason::Empty => write!(f, "dataset contains no sides"),
        }
    }
}

/// Outcome of one projection attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Sides(Vec<CassetteSide>),
    UseFallback(FallbackReason),
}

impl Projection {
    /// Collapse a projection result: failure and "valid but empty" both mean fallback
    pub fn decide(result: Result<Vec<CassetteSide>>) -> Self {
        match result {
            Ok(sides) if sides.is_empty() => Projection::UseFallback(FallbackReason::Empty),
            Ok(sides) => Projection::Sides(sides),
            Err(e) => Projection::UseFallback(FallbackReason::Query(e.to_string())),
        }
    }
}

/// Where the served sides came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "origin", content = "reason", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Dataset,
    Fallback(FallbackReason),
}

/// The ordered, never-empty sequence of sides for the presentation layer
#[derive(Debug, Clone)]
pub struct Catalog {
    sides: Vec<CassetteSide>,
    origin: CatalogOrigin,
}

impl Catalog {
    pub fn from_projection(projection: Projection) -> Self {
        match projection {
            Projection::Sides(sides) => {
                info!("Loaded cassette sides: {}", sides.len());
                Self {
                    sides,
                    origin: CatalogOrigin::Dataset,
                }
            }
            Projection::UseFallback(reason) => Self::fallback(reason),
        }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        warn!("Falling back to built-in cassette data: {}", reason);
        Self {
            sides: fallback_sides(),
            origin: CatalogOrigin::Fallback(reason),
        }
    }

    /// Project a serialized dataset, falling back on any failure
    pub async fn from_bytes(bytes: &[u8]) -> Self {
        let dataset = match Dataset::from_bytes(bytes).await {
            Ok(dataset) => dataset,
            Err(e) => return Self::fallback(FallbackReason::Open(e.to_string())),
        };

        let projection = Projection::decide(project_sides(&dataset).await);
        dataset.close().await;
        Self::from_projection(projection)
    }

    /// Retrieve and project a dataset, falling back on any failure
    pub async fn load(source: &DatasetSource) -> Self {
        info!("Loading cassette dataset from {}", source);
        match source.fetch().await {
            Ok(bytes) => Self::from_bytes(&bytes).await,
            Err(e) => Self::fallback(FallbackReason::Retrieval(e.to_string())),
        }
    }

    pub fn sides(&self) -> &[CassetteSide] {
        &self.sides
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, CatalogOrigin::Fallback(_))
    }
}

static GLOBAL_CATALOG: OnceCell<Arc<Catalog>> = OnceCell::const_new();

/// Process-wide catalog, loaded on first use
///
/// Concurrent first callers share one load. Later calls return the same
/// catalog regardless of `source`; there is no reload.
pub async fn global_catalog(source: &DatasetSource) -> Arc<Catalog> {
    GLOBAL_CATALOG
        .get_or_init(|| async { Arc::new(Catalog::load(source).await) })
        .await
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DatasetSource::parse("https://archive.example/cassette_library.db"),
            DatasetSource::Http("https://archive.example/cassette_library.db".into())
        );
        assert_eq!(
            DatasetSource::parse("/srv/cta/cassette_library.db"),
            DatasetSource::File(PathBuf::from("/srv/cta/cassette_library.db"))
        );
    }

    #[test]
    fn test_decide_empty_is_fallback() {
        assert_eq!(
            Projection::decide(Ok(vec![])),
            Projection::UseFallback(FallbackReason::Empty)
        );
        assert!(matches!(
            Projection::decide(Err(Error::InvalidDataset("no sides table".into()))),
            Projection::UseFallback(FallbackReason::Query(_))
        ));
        let sides = fallback_sides();
        assert_eq!(
            Projection::decide(Ok(sides.clone())),
            Projection::Sides(sides)
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_retrieval_fallback() {
        let source = DatasetSource::File(PathBuf::from("/nonexistent/cta/cassette_library.db"));
        let catalog = Catalog::load(&source).await;
        assert!(matches!(
            catalog.origin(),
            CatalogOrigin::Fallback(FallbackReason::Retrieval(_))
        ));
        assert_eq!(catalog.sides(), fallback_sides().as_slice());
    }

    #[test]
    fn test_origin_serialization() {
        let json = serde_json::to_value(CatalogOrigin::Fallback(FallbackReason::Empty)).unwrap();
        assert_eq!(json, serde_json::json!({"origin": "fallback", "reason": {"kind": "empty"}}));

        let json = serde_json::to_value(CatalogOrigin::Dataset).unwrap();
        assert_eq!(json, serde_json::json!({"origin": "dataset"}));
    }
}
