use super::RecordStore;
use crate::error::RecordError;
use crate::models::{CodeProjection, CodeRecord};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Records kept as a JSON array of `CodeRecord` on disk.
///
/// The file is re-read on every lookup so edits show up without a restart.
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load all records from the file
    pub async fn load_records(&self) -> Result<Vec<CodeRecord>, RecordError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => RecordError::Fetch(format!(
                    "records file not found at: {}",
                    self.path.display()
                )),
                _ => RecordError::Fetch(format!("{}: {}", self.path.display(), e)),
            })?;

        // Handle empty records file
        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        serde_json::from_str(&content)
            .map_err(|e| RecordError::Fetch(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn fetch_projection(&self, id: &str) -> Result<CodeProjection, RecordError> {
        self.load_records()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .map(CodeProjection::from)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }
}
