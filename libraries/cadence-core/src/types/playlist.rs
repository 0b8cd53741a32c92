/// Playlist types
use super::track::Track;
use serde::{Deserialize, Serialize};

/// Ordered sequence of tracks
///
/// Insertion order defines navigation order. A playlist is replaced
/// wholesale on reload and never edited in place, so there are no mutators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist from tracks in navigation order
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`, if in bounds
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Iterate tracks in navigation order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// All tracks as a slice
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

/// Catalog response body: `{ "data": [ {id, title, artist}, ... ] }`
///
/// The bundled fallback dataset uses the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    /// Tracks in catalog order
    pub data: Vec<Track>,
}

impl From<CatalogResponse> for Playlist {
    fn from(response: CatalogResponse) -> Self {
        Self::new(response.data)
    }
}
