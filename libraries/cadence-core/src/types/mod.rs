//! Domain types for Cadence

mod ids;
mod playlist;
mod resource;
mod track;

pub use ids::TrackId;
pub use playlist::{CatalogResponse, Playlist};
pub use resource::AudioResource;
pub use track::Track;
