use crate::errors::{GifshareError, Result};
use crate::image::{Classifier, Source, object_name, resolve_name};
use crate::interfaces::{Browser, Fetcher};
use crate::progress::ProgressDisplay;
use crate::store::{Bucket, Deletion, ObjectUrls};
use crate::utils::log_utils::Logger;
use std::path::Path;

/// Sources starting with this are fetched over HTTP instead of read from disk
pub const URL_PREFIX: &str = "http";

/// High level application functionality: classify, name and upload images,
/// and look up what is already stored.
pub struct GifShare {
    bucket: Bucket,
    fetcher: Box<dyn Fetcher>,
    classifier: Classifier,
    browser: Box<dyn Browser>,
    progress: ProgressDisplay,
    logger: Logger,
}

impl GifShare {
    pub fn new(
        bucket: Bucket,
        fetcher: Box<dyn Fetcher>,
        classifier: Classifier,
        browser: Box<dyn Browser>,
        logger: Logger,
    ) -> Self {
        Self {
            bucket,
            fetcher,
            classifier,
            browser,
            progress: ProgressDisplay::default(),
            logger,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ProgressDisplay) -> Self {
        self.progress = progress;
        self
    }

    /// Upload `source`, which is either a URL or the path of a local file.
    pub fn upload(&self, source: &str, name: Option<&str>, force: bool) -> Result<String> {
        if source.starts_with(URL_PREFIX) {
            self.upload_url(source, name, force)
        } else {
            self.upload_file(Path::new(source), name, force)
        }
    }

    /// Download the image at `url` and store it. The name comes from the
    /// URL unless `name` is given.
    pub fn upload_url(&self, url: &str, name: Option<&str>, force: bool) -> Result<String> {
        self.logger.info(&format!("Uploading URL '{}'", url));

        let mut download = self.progress.tracker("Downloading image");
        let data = self.fetcher.download(url, &mut download)?;

        let kind = self.classifier.classify_bytes(&data)?;
        let filename = object_name(&resolve_name(Source::Url(url), name)?, kind);
        self.logger
            .debug(&format!("Detected {} image, storing as '{}'", kind, filename));

        let mut upload = self.progress.tracker("Uploading image");
        self.bucket
            .upload_bytes(&filename, kind.content_type(), &data, force, &mut upload)
    }

    /// Store a file from the local filesystem. The name comes from the file
    /// name unless `name` is given.
    pub fn upload_file(&self, path: &Path, name: Option<&str>, force: bool) -> Result<String> {
        self.logger
            .info(&format!("Uploading file '{}'", path.display()));
        if !path.is_file() {
            return Err(GifshareError::LocalFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let kind = self.classifier.classify_file(path)?;
        let filename = object_name(&resolve_name(Source::Path(path), name)?, kind);
        self.logger
            .debug(&format!("Detected {} image, storing as '{}'", kind, filename));

        let mut upload = self.progress.tracker("Uploading image");
        self.bucket
            .upload_file(&filename, kind.content_type(), path, force, &mut upload)
    }

    pub fn delete(&self, name: &str) -> Result<Deletion> {
        self.bucket.delete(name)
    }

    pub fn get_url(&self, name: &str) -> Result<String> {
        self.bucket.get_url(name)
    }

    /// Open the stored image `name` in the user's browser
    pub fn show(&self, name: &str) -> Result<()> {
        let url = self.get_url(name)?;
        self.logger.info(&format!("Opening {}", url));
        self.browser.open(&url)
    }

    #[must_use]
    pub fn list(&self) -> ObjectUrls<'_> {
        self.bucket.list()
    }

    #[must_use]
    pub fn grep(&self, pattern: &str) -> ObjectUrls<'_> {
        self.bucket.grep(pattern)
    }
}
