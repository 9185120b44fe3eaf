//! Uploaded files.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{FileStorage, FileStorageError, FileUpload, MAX_UPLOAD_BYTES};

use super::MemoryBackend;

/// URL prefix under which stored objects are published.
const PUBLIC_PREFIX: &str = "/files";

/// Stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MemoryBackend {
    /// Fetch an object previously stored under `path`.
    pub fn file(&self, path: &str) -> Option<StoredFile> {
        self.read().ok()?.files.get(path).cloned()
    }
}

#[async_trait]
impl FileStorage for MemoryBackend {
    async fn upload(&self, upload: FileUpload) -> Result<String, FileStorageError> {
        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(FileStorageError::too_large(MAX_UPLOAD_BYTES));
        }
        let path = upload.path.trim_start_matches('/').to_owned();
        if path.is_empty() {
            return Err(FileStorageError::rejected("object path must not be empty"));
        }
        let mut tables = self
            .write()
            .map_err(|err| FileStorageError::rejected(err.to_string()))?;
        debug!(%path, size = upload.bytes.len(), "stored upload");
        tables.files.insert(
            path.clone(),
            StoredFile {
                content_type: upload.content_type,
                bytes: upload.bytes,
            },
        );
        Ok(format!("{PUBLIC_PREFIX}/{path}"))
    }
}
