//! Port for the file storage collaborator.
//!
//! Submissions may carry an uploaded archive. The adapter stores the bytes and
//! hands back a public URL, which is what the submission row records.

use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by file storage adapters.
    pub enum FileStorageError {
        /// The upload exceeds the adapter's size limit.
        TooLarge { max_bytes: usize } => "upload exceeds {max_bytes} bytes",
        /// The storage backend refused the object.
        Rejected { message: String } => "upload rejected: {message}",
        /// Storage could not be reached.
        Connection { message: String } => "file storage connection failed: {message}",
    }
}

/// Largest object adapters accept (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Object to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Bucket-relative path, e.g. `submissions/<mentee>/<file>`.
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Store uploaded files and return their public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `upload` and return the URL it can be fetched from.
    async fn upload(&self, upload: FileUpload) -> Result<String, FileStorageError>;
}

/// Fixture that discards bytes and fabricates a URL from the path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFileStorage;

#[async_trait]
impl FileStorage for FixtureFileStorage {
    async fn upload(&self, upload: FileUpload) -> Result<String, FileStorageError> {
        Ok(format!("/storage/{}", upload.path))
    }
}

impl From<FileStorageError> for Error {
    fn from(err: FileStorageError) -> Self {
        match err {
            FileStorageError::TooLarge { .. } => Error::invalid_request(err.to_string())
                .with_details(serde_json::json!({ "field": "file", "code": "file_too_large" })),
            FileStorageError::Rejected { message } => Error::internal(message),
            FileStorageError::Connection { message } => Error::service_unavailable(message),
        }
    }
}
