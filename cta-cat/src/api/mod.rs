//! HTTP API handlers for cta-cat

pub mod catalog;
pub mod error;
pub mod health;
pub mod personnel;
pub mod player;

pub use catalog::{get_catalog_info, get_side, list_sides};
pub use error::ApiError;
pub use health::health_routes;
pub use personnel::{get_personnel, list_personnel};
pub use player::{apply_event, get_player, load_side, player_command};
