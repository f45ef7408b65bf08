use crate::utils::log_utils::Logger;
use aws_sdk_s3::Client;

/// Uploads at or above this size go through multipart upload
pub const MULTIPART_THRESHOLD: u64 = 8 * 1024 * 1024;
/// Size of every multipart part except the last
pub const PART_SIZE: usize = 8 * 1024 * 1024;

/// `ObjectStore` over an S3 (or S3-compatible) bucket.
///
/// The SDK is async; every call is bridged onto the runtime owned here so
/// callers stay synchronous.
pub struct S3Backend {
    pub(crate) bucket_name: String,
    pub(crate) region: String,
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) logger: Logger,
}

impl S3Backend {
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}
