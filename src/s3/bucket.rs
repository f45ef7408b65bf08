use crate::errors::{GifshareError, Result};
use crate::s3::models::S3Backend;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use serde_json::json;

pub const INDEX_DOCUMENT: &str = "index.html";
pub const ERROR_DOCUMENT: &str = "error.html";

const INDEX_HTML: &str = "<!doctype html>\n<h1>Welcome to gifshare</h1>\n";
const ERROR_HTML: &str = "<!doctype html>\n<h1>It's all gone wrong!</h1>\n";

/// Bucket policy allowing anonymous reads of every object
#[must_use]
pub fn public_read_policy(bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "PublicReadGetObject",
                "Effect": "Allow",
                "Principal": "*",
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{bucket}/*")]
            }
        ]
    })
    .to_string()
}

impl S3Backend {
    /// Create the bucket and set it up to serve its objects as a public website
    pub fn init_bucket(&self) -> Result<()> {
        self.logger
            .info(&format!("Creating bucket '{}'", self.bucket_name));
        self.create_bucket()?;

        self.logger.info("Installing public-read bucket policy");
        self.runtime.block_on(async {
            self.client
                .put_bucket_policy()
                .bucket(&self.bucket_name)
                .policy(public_read_policy(&self.bucket_name))
                .send()
                .await
                .map_err(|e| GifshareError::storage("PutBucketPolicy", DisplayErrorContext(&e)))?;
            Ok::<(), GifshareError>(())
        })?;

        self.put_page(ERROR_DOCUMENT, ERROR_HTML)?;
        self.put_page(INDEX_DOCUMENT, INDEX_HTML)?;

        self.logger.info("Enabling static website hosting");
        let website = WebsiteConfiguration::builder()
            .index_document(
                IndexDocument::builder()
                    .suffix(INDEX_DOCUMENT)
                    .build()
                    .map_err(|e| GifshareError::storage("PutBucketWebsite", e))?,
            )
            .error_document(
                ErrorDocument::builder()
                    .key(ERROR_DOCUMENT)
                    .build()
                    .map_err(|e| GifshareError::storage("PutBucketWebsite", e))?,
            )
            .build();
        self.runtime.block_on(async {
            self.client
                .put_bucket_website()
                .bucket(&self.bucket_name)
                .website_configuration(website)
                .send()
                .await
                .map_err(|e| {
                    GifshareError::storage("PutBucketWebsite", DisplayErrorContext(&e))
                })?;
            Ok::<(), GifshareError>(())
        })
    }

    fn create_bucket(&self) -> Result<()> {
        self.runtime.block_on(async {
            let mut request = self.client.create_bucket().bucket(&self.bucket_name);

            // us-east-1 rejects an explicit location constraint
            if self.region != "us-east-1" {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                        .build(),
                );
            }

            match request.send().await {
                Ok(_) => Ok(()),
                Err(e) => {
                    if e.as_service_error()
                        .is_some_and(|se| se.is_bucket_already_owned_by_you())
                    {
                        self.logger.info(&format!(
                            "Bucket '{}' already exists, proceeding...",
                            self.bucket_name
                        ));
                        return Ok(());
                    }
                    Err(GifshareError::storage("CreateBucket", DisplayErrorContext(&e)))
                }
            }
        })
    }

    fn put_page(&self, key: &str, html: &'static str) -> Result<()> {
        self.logger.debug(&format!("Uploading '{}'", key));
        self.runtime.block_on(async {
            self.client
                .put_object()
                .bucket(&self.bucket_name)
                .key(key)
                .content_type("text/html")
                .body(ByteStream::from_static(html.as_bytes()))
                .send()
                .await
                .map_err(|e| GifshareError::storage("PutObject", DisplayErrorContext(&e)))?;
            Ok::<(), GifshareError>(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_targets_every_object_in_bucket() {
        let policy: serde_json::Value = serde_json::from_str(&public_read_policy("gifs")).unwrap();
        let statement = &policy["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Principal"], "*");
        assert_eq!(statement["Action"][0], "s3:GetObject");
        assert_eq!(statement["Resource"][0], "arn:aws:s3:::gifs/*");
    }
}
