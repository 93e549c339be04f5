use std::path::PathBuf;

use crate::errors::CoreError;

/// Durable home for snapshot bytes, one blob per store.
///
/// The engine treats the store as opaque: it hands over the full
/// snapshot on every save and reads it back on startup. `load`
/// returns `Ok(None)` when nothing has been stored yet, which is not
/// an error.
pub trait StateStore: Send {
    fn load(&mut self) -> Result<Option<Vec<u8>>, CoreError>;

    fn save(&mut self, bytes: &[u8]) -> Result<(), CoreError>;
}

/// Snapshot file on local disk. The file appears on first save; a
/// missing file reads as "nothing stored".
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, CoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory store for tests and hosts that shuttle the bytes
/// themselves (export/import flows).
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with existing snapshot bytes.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}
