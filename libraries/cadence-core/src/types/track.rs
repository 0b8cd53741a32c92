/// Track type
use super::ids::TrackId;
use serde::{Deserialize, Serialize};

/// A single playable item
///
/// Immutable once loaded into a playlist; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Server-side identifier, used to request the audio bytes
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,
}

impl Track {
    /// Create a new track
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Now-playing text: `"{title} - {artist}"`
    pub fn display_text(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}
