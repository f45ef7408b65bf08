use crate::errors::{GifshareError, Result};
use crate::interfaces::Fetcher;
use crate::progress::ProgressTracker;
use crate::utils::log_utils::Logger;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_LENGTH;
use std::io::Read;

/// Size of each body read while downloading
pub const CHUNK_SIZE: usize = 64;
/// Upper bound on the buffer reserved up front from `content-length`
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Downloads images over HTTP(S) with a blocking reqwest client
pub struct HttpFetcher {
    client: Client,
    logger: Logger,
}

impl HttpFetcher {
    pub fn new(logger: Logger) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gifshare/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, logger })
    }
}

impl Fetcher for HttpFetcher {
    fn download(&self, url: &str, progress: &mut ProgressTracker) -> Result<Vec<u8>> {
        self.logger.debug("Downloading image ...");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GifshareError::Download {
                url: url.to_string(),
                reason: format!("server responded with {status}"),
            });
        }

        let length = content_length(response.headers().get(CONTENT_LENGTH)).ok_or_else(|| {
            GifshareError::Download {
                url: url.to_string(),
                reason: "missing or invalid content-length header".to_string(),
            }
        })?;
        self.logger.debug(&format!("Content length: {length}"));

        read_chunked(response, length, progress, &self.logger).map_err(|e| match e {
            GifshareError::Io(io) => GifshareError::Download {
                url: url.to_string(),
                reason: io.to_string(),
            },
            other => other,
        })
    }
}

fn content_length(header: Option<&reqwest::header::HeaderValue>) -> Option<u64> {
    header?.to_str().ok()?.trim().parse().ok()
}

/// Read `length` bytes from `reader`, `CHUNK_SIZE` at a time, reporting the
/// running total after every chunk.
pub fn read_chunked<R: Read>(
    mut reader: R,
    length: u64,
    progress: &mut ProgressTracker,
    logger: &Logger,
) -> Result<Vec<u8>> {
    // content-length is whatever the server claims; grow past this as data arrives
    let reserve = usize::try_from(length.min(MAX_PREALLOCATION)).unwrap_or(0);
    let mut content = Vec::with_capacity(reserve);
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut received: u64 = 0;

    progress.update(0, length);
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                progress.abandon();
                return Err(e.into());
            }
        };
        content.extend_from_slice(&chunk[..n]);
        received += n as u64;
        logger.debug(&format!("Update: {received}"));
        progress.update(received, length);
    }

    if received < length {
        progress.abandon();
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("body ended after {received} of {length} bytes"),
        )
        .into());
    }
    progress.finish();

    Ok(content)
}
