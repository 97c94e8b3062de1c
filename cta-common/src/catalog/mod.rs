//! Cassette catalog
//!
//! Projection of the relational dataset into nested side documents, the
//! built-in fallback, and the read-time folds used by the browse views.

pub mod browse;
pub mod document;
pub mod fallback;
pub mod loader;
pub mod personnel;
pub mod projection;

pub use browse::{find_side, visible_sides, SideSummary};
pub use document::{
    CassetteSide, Session, SessionPersonnel, SideLetter, SideMetadata, Track, TrackCredit,
};
pub use fallback::fallback_sides;
pub use loader::{global_catalog, Catalog, CatalogOrigin, DatasetSource, FallbackReason, Projection};
pub use personnel::{
    discography, personnel_names, AlbumAppearances, Appearance, CreditedRole, Discography,
};
pub use projection::project_sides;
