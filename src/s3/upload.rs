use crate::errors::{GifshareError, Result};
use crate::progress::ProgressTracker;
use crate::s3::models::{MULTIPART_THRESHOLD, PART_SIZE, S3Backend};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use std::fs::File;
use std::io::Read;
use std::path::Path;

type Parts<'a> = dyn Iterator<Item = Result<Vec<u8>>> + 'a;

impl S3Backend {
    /// Upload in-memory data under `key`
    pub fn upload_data(
        &self,
        key: &str,
        content_type: &str,
        data: &[u8],
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        let result = self.send_data(key, content_type, data, progress);
        if result.is_err() {
            progress.abandon();
        }
        result
    }

    /// Upload a local file under `key` without reading it fully into memory
    pub fn upload_path(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        let result = self.send_path(key, content_type, path, progress);
        if result.is_err() {
            progress.abandon();
        }
        result
    }

    fn send_data(
        &self,
        key: &str,
        content_type: &str,
        data: &[u8],
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        let total = data.len() as u64;
        progress.update(0, total);

        if total < MULTIPART_THRESHOLD {
            self.put_single(key, content_type, ByteStream::from(data.to_vec()))?;
            progress.update(total, total);
            return Ok(());
        }

        let mut parts = data
            .chunks(PART_SIZE)
            .map(|chunk| Ok::<Vec<u8>, GifshareError>(chunk.to_vec()));
        self.put_multipart(key, content_type, total, &mut parts, progress)
    }

    fn send_path(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        let total = std::fs::metadata(path)?.len();
        progress.update(0, total);

        if total < MULTIPART_THRESHOLD {
            let body = self
                .runtime
                .block_on(ByteStream::from_path(path))
                .map_err(|e| {
                    GifshareError::storage("reading upload body", DisplayErrorContext(&e))
                })?;
            self.put_single(key, content_type, body)?;
            progress.update(total, total);
            return Ok(());
        }

        let mut file = File::open(path)?;
        let mut parts = std::iter::from_fn(move || match read_part(&mut file) {
            Ok(buf) if buf.is_empty() => None,
            Ok(buf) => Some(Ok(buf)),
            Err(e) => Some(Err(GifshareError::from(e))),
        });
        self.put_multipart(key, content_type, total, &mut parts, progress)
    }

    fn put_single(&self, key: &str, content_type: &str, body: ByteStream) -> Result<()> {
        self.logger.debug(&format!(
            "PutObject '{}' into bucket '{}'",
            key, self.bucket_name
        ));
        self.runtime.block_on(async {
            self.client
                .put_object()
                .bucket(&self.bucket_name)
                .key(key)
                .content_type(content_type)
                .body(body)
                .send()
                .await
                .map_err(|e| GifshareError::storage("PutObject", DisplayErrorContext(&e)))?;
            Ok::<(), GifshareError>(())
        })
    }

    fn put_multipart(
        &self,
        key: &str,
        content_type: &str,
        total: u64,
        parts: &mut Parts<'_>,
        progress: &mut ProgressTracker,
    ) -> Result<()> {
        let upload_id = self.runtime.block_on(async {
            let response = self
                .client
                .create_multipart_upload()
                .bucket(&self.bucket_name)
                .key(key)
                .content_type(content_type)
                .send()
                .await
                .map_err(|e| {
                    GifshareError::storage("CreateMultipartUpload", DisplayErrorContext(&e))
                })?;
            response
                .upload_id()
                .map(str::to_string)
                .ok_or_else(|| GifshareError::storage("CreateMultipartUpload", "no upload id"))
        })?;
        self.logger.debug(&format!(
            "Started multipart upload {} for '{}'",
            upload_id, key
        ));

        let result = self
            .send_parts(key, &upload_id, total, parts, progress)
            .and_then(|completed| self.complete_multipart(key, &upload_id, completed));

        if result.is_err() {
            if let Err(e) = self.abort_multipart(key, &upload_id) {
                self.logger
                    .warn(&format!("warn: failed to abort multipart upload: {}", e));
            }
        }
        result
    }

    fn send_parts(
        &self,
        key: &str,
        upload_id: &str,
        total: u64,
        parts: &mut Parts<'_>,
        progress: &mut ProgressTracker,
    ) -> Result<Vec<CompletedPart>> {
        let mut completed = Vec::new();
        let mut sent: u64 = 0;

        for (index, part) in parts.enumerate() {
            let part = part?;
            let part_number = i32::try_from(index + 1)
                .map_err(|e| GifshareError::storage("UploadPart", e))?;
            let size = part.len() as u64;

            let e_tag = self.runtime.block_on(async {
                let response = self
                    .client
                    .upload_part()
                    .bucket(&self.bucket_name)
                    .key(key)
                    .upload_id(upload_id)
                    .part_number(part_number)
                    .body(ByteStream::from(part))
                    .send()
                    .await
                    .map_err(|e| GifshareError::storage("UploadPart", DisplayErrorContext(&e)))?;
                Ok::<Option<String>, GifshareError>(response.e_tag().map(str::to_string))
            })?;

            completed.push(
                CompletedPart::builder()
                    .set_e_tag(e_tag)
                    .part_number(part_number)
                    .build(),
            );
            sent += size;
            progress.update(sent, total);
        }

        Ok(completed)
    }

    fn complete_multipart(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<CompletedPart>,
    ) -> Result<()> {
        let upload = CompletedMultipartUpload::builder()
            .set_parts(Some(parts))
            .build();
        self.runtime.block_on(async {
            self.client
                .complete_multipart_upload()
                .bucket(&self.bucket_name)
                .key(key)
                .upload_id(upload_id)
                .multipart_upload(upload)
                .send()
                .await
                .map_err(|e| {
                    GifshareError::storage("CompleteMultipartUpload", DisplayErrorContext(&e))
                })?;
            Ok::<(), GifshareError>(())
        })
    }

    fn abort_multipart(&self, key: &str, upload_id: &str) -> Result<()> {
        self.runtime.block_on(async {
            self.client
                .abort_multipart_upload()
                .bucket(&self.bucket_name)
                .key(key)
                .upload_id(upload_id)
                .send()
                .await
                .map_err(|e| {
                    GifshareError::storage("AbortMultipartUpload", DisplayErrorContext(&e))
                })?;
            Ok::<(), GifshareError>(())
        })
    }
}

/// Read up to `PART_SIZE` bytes; an empty buffer means end of file.
fn read_part(file: &mut File) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(PART_SIZE);
    file.by_ref().take(PART_SIZE as u64).read_to_end(&mut buf)?;
    Ok(buf)
}
