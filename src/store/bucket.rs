use crate::errors::{GifshareError, Result};
use crate::image::validate_object_name;
use crate::interfaces::ObjectStore;
use crate::progress::ProgressTracker;
use crate::store::listing::ObjectUrls;
use crate::utils::log_utils::Logger;
use std::path::Path;

/// What `Bucket::delete` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    Missing,
}

/// A configured bucket: names in, public URLs out.
///
/// Every call is a live round-trip to the backing store; nothing is cached.
pub struct Bucket {
    pub(crate) store: Box<dyn ObjectStore>,
    pub(crate) web_root: String,
    logger: Logger,
}

impl Bucket {
    pub fn new(store: Box<dyn ObjectStore>, web_root: &str, logger: Logger) -> Self {
        Self {
            store,
            web_root: web_root.to_string(),
            logger,
        }
    }

    /// Public URL for `name`. The name is appended verbatim.
    #[must_use]
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{}", self.web_root, name)
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        self.store.object_exists(name)
    }

    /// Upload in-memory data, refusing to overwrite unless `force` is set.
    pub fn upload_bytes(
        &self,
        name: &str,
        content_type: &str,
        data: &[u8],
        force: bool,
        progress: &mut ProgressTracker,
    ) -> Result<String> {
        let url = self.check_destination(name, force)?;
        self.logger.debug(&format!(
            "Uploading {} bytes to '{}' as {}",
            data.len(),
            name,
            content_type
        ));
        self.store.put_bytes(name, content_type, data, progress)?;
        Ok(url)
    }

    /// Upload a local file, refusing to overwrite unless `force` is set.
    pub fn upload_file(
        &self,
        name: &str,
        content_type: &str,
        local_path: &Path,
        force: bool,
        progress: &mut ProgressTracker,
    ) -> Result<String> {
        let url = self.check_destination(name, force)?;
        self.logger.debug(&format!(
            "Uploading '{}' to '{}' as {}",
            local_path.display(),
            name,
            content_type
        ));
        self.store.put_file(name, content_type, local_path, progress)?;
        Ok(url)
    }

    /// Delete `name`. A missing object is reported, not treated as an error.
    pub fn delete(&self, name: &str) -> Result<Deletion> {
        if self.store.object_exists(name)? {
            self.store.delete_object(name)?;
            self.logger.info(&format!("Deleted '{}'", name));
            Ok(Deletion::Deleted)
        } else {
            self.logger
                .warn(&format!("The image '{}' does not exist", name));
            Ok(Deletion::Missing)
        }
    }

    pub fn get_url(&self, name: &str) -> Result<String> {
        if self.store.object_exists(name)? {
            Ok(self.url_for(name))
        } else {
            Err(GifshareError::MissingFile {
                name: name.to_string(),
            })
        }
    }

    /// URL of every object, fetched page by page as the iterator advances.
    #[must_use]
    pub fn list(&self) -> ObjectUrls<'_> {
        ObjectUrls::new(self, None)
    }

    /// Like `list`, keeping only names that contain `pattern` literally.
    #[must_use]
    pub fn grep(&self, pattern: &str) -> ObjectUrls<'_> {
        ObjectUrls::new(self, Some(pattern.to_string()))
    }

    fn check_destination(&self, name: &str, force: bool) -> Result<String> {
        validate_object_name(name)?;
        let url = self.url_for(name);
        if !force && self.store.object_exists(name)? {
            return Err(GifshareError::FileAlreadyExists { url });
        }
        Ok(url)
    }
}
