pub mod bucket;
pub mod client;
pub mod file_ops;
pub mod models;
pub mod upload;

// Re-export types for convenient access from other modules
pub use bucket::public_read_policy;
pub use models::S3Backend;

use crate::errors::Result;
use crate::interfaces::{ListPage, ObjectStore};
use crate::progress::ProgressTracker;
use std::path::Path;

impl ObjectStore for S3Backend {
    fn object_exists(&self, name: &str) -> Result<bool> {
        self.head_exists(name)
    }

    fn put_bytes(
        &self,
        name: &str,
        content_type: &str,
        data: &[u8],
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        self.upload_data(name, content_type, data, progress)
    }

    fn put_file(
        &self,
        name: &str,
        content_type: &str,
        path: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        self.upload_path(name, content_type, path, progress)
    }

    fn delete_object(&self, name: &str) -> Result<()> {
        self.remove(name)
    }

    fn list_page(&self, continuation: Option<String>) -> Result<ListPage> {
        self.list_keys(continuation)
    }
}
