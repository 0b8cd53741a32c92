/// Locally addressable audio resource
use super::ids::TrackId;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Audio bytes for exactly one track, materialized as a temporary file
///
/// The resource is exclusively owned: whoever holds it (normally the output
/// primitive) is the only consumer. Dropping it deletes the backing file,
/// which is how a superseded resource gets revoked.
pub struct AudioResource {
    track_id: TrackId,
    file: NamedTempFile,
    len: u64,
    content_type: Option<String>,
}

impl AudioResource {
    /// Wrap an already written temporary file
    ///
    /// # Errors
    /// Returns an error if the file metadata cannot be read
    pub fn from_file(
        track_id: TrackId,
        file: NamedTempFile,
        content_type: Option<String>,
    ) -> io::Result<Self> {
        let len = file.as_file().metadata()?.len();
        Ok(Self {
            track_id,
            file,
            len,
            content_type,
        })
    }

    /// Materialize in-memory bytes as a resource
    ///
    /// # Errors
    /// Returns an error if the temporary file cannot be created or written
    pub fn from_bytes(
        track_id: TrackId,
        bytes: impl AsRef<[u8]>,
        content_type: Option<String>,
    ) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        file.write_all(bytes.as_ref())?;
        file.flush()?;
        Self::from_file(track_id, file, content_type)
    }

    /// Track this resource belongs to
    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }

    /// Local path of the audio bytes
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Size in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the body was empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `Content-Type` reported by the server, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Read the full contents back
    ///
    /// # Errors
    /// Returns an error if the backing file cannot be read
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        std::fs::read(self.file.path())
    }
}

impl fmt::Debug for AudioResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioResource")
            .field("track_id", &self.track_id)
            .field("path", &self.file.path())
            .field("len", &self.len)
            .field("content_type", &self.content_type)
            .finish()
    }
}
