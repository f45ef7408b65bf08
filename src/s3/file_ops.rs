use crate::errors::{GifshareError, Result};
use crate::interfaces::ListPage;
use crate::s3::models::S3Backend;
use aws_sdk_s3::error::DisplayErrorContext;

impl S3Backend {
    /// Check if an object exists in the bucket
    pub fn head_exists(&self, key: &str) -> Result<bool> {
        self.logger.debug(&format!(
            "Checking if object '{}' exists in bucket '{}'",
            key, self.bucket_name
        ));

        self.runtime.block_on(async {
            let resp = self
                .client
                .head_object()
                .bucket(&self.bucket_name)
                .key(key)
                .send()
                .await;

            match resp {
                Ok(_) => Ok(true),
                Err(e) => {
                    if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                        return Ok(false);
                    }
                    Err(GifshareError::storage("HeadObject", DisplayErrorContext(&e)))
                }
            }
        })
    }

    /// Delete an object from the bucket
    pub fn remove(&self, key: &str) -> Result<()> {
        self.runtime.block_on(async {
            self.client
                .delete_object()
                .bucket(&self.bucket_name)
                .key(key)
                .send()
                .await
                .map_err(|e| GifshareError::storage("DeleteObject", DisplayErrorContext(&e)))?;
            Ok::<(), GifshareError>(())
        })
    }

    /// Fetch one page of object keys
    pub fn list_keys(&self, continuation: Option<String>) -> Result<ListPage> {
        self.logger.debug(&format!(
            "Listing objects in bucket '{}' (continuation: {:?})",
            self.bucket_name, continuation
        ));

        let page = self.runtime.block_on(async {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket_name)
                .set_continuation_token(continuation)
                .send()
                .await
                .map_err(|e| GifshareError::storage("ListObjectsV2", DisplayErrorContext(&e)))?;

            let names = response
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect();

            let next_token = if response.is_truncated().unwrap_or(false) {
                response.next_continuation_token().map(str::to_string)
            } else {
                None
            };

            Ok::<ListPage, GifshareError>(ListPage { names, next_token })
        })?;

        self.logger
            .debug(&format!("Found {} objects in page", page.names.len()));
        Ok(page)
    }
}
