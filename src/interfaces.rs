use crate::errors::Result;
use crate::progress::ProgressTracker;
use mockall::automock;
use std::path::Path;

/// One page of object names from a bucket listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub names: Vec<String>,
    /// Token for the following page, `None` on the last page
    pub next_token: Option<String>,
}

/// Remote key-value blob service backing a bucket
#[automock]
pub trait ObjectStore {
    fn object_exists(&self, name: &str) -> Result<bool>;

    /// Store `data` under `name`, reporting bytes sent through `progress`.
    fn put_bytes(
        &self,
        name: &str,
        content_type: &str,
        data: &[u8],
        progress: &mut ProgressTracker,
    ) -> Result<()>;

    /// Store the contents of a local file under `name`.
    fn put_file(
        &self,
        name: &str,
        content_type: &str,
        path: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<()>;

    fn delete_object(&self, name: &str) -> Result<()>;

    fn list_page(&self, continuation: Option<String>) -> Result<ListPage>;
}

/// Retrieves remote content into memory
#[automock]
pub trait Fetcher {
    fn download(&self, url: &str, progress: &mut ProgressTracker) -> Result<Vec<u8>>;
}

/// Describes data from its content, in the style of `file(1)`
#[automock]
pub trait SignatureDetector {
    fn describe_bytes(&self, data: &[u8]) -> String;
    fn describe_file(&self, path: &Path) -> Result<String>;
}

/// Opens URLs for the user
#[automock]
pub trait Browser {
    fn open(&self, url: &str) -> Result<()>;
}

/// Signature detection backed by the `infer` magic-number tables
pub struct InferDetector;

impl InferDetector {
    fn describe(kind: Option<infer::Type>) -> String {
        match kind {
            Some(kind) => match kind.mime_type() {
                "image/png" => "PNG image data".to_string(),
                "image/jpeg" => "JPEG image data".to_string(),
                "image/gif" => "GIF image data".to_string(),
                mime => format!("{} data ({})", kind.extension().to_uppercase(), mime),
            },
            None => "data".to_string(),
        }
    }
}

impl SignatureDetector for InferDetector {
    fn describe_bytes(&self, data: &[u8]) -> String {
        Self::describe(infer::get(data))
    }

    fn describe_file(&self, path: &Path) -> Result<String> {
        Ok(Self::describe(infer::get_from_path(path)?))
    }
}

/// Opens URLs in the user's default browser
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url)?;
        Ok(())
    }
}
