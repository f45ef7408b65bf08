// Shared helpers for the integration tests.
#![allow(dead_code)]

use gifshare::GifShare;
use gifshare::image::Classifier;
use gifshare::interfaces::{MockBrowser, MockFetcher, MockObjectStore};
use gifshare::progress::ProgressDisplay;
use gifshare::store::Bucket;
use gifshare::utils::log_utils::Logger;
use std::fs;
use std::path::{Path, PathBuf};

pub const WEB_ROOT: &str = "http://dummy.web.root/";

pub const PNG_BYTES: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00";

pub fn gifshare_with(store: MockObjectStore, fetcher: MockFetcher, browser: MockBrowser) -> GifShare {
    let logger = Logger::new(0);
    GifShare::new(
        Bucket::new(Box::new(store), WEB_ROOT, logger),
        Box::new(fetcher),
        Classifier::default(),
        Box::new(browser),
        logger,
    )
    .with_progress(ProgressDisplay::Hidden)
}

pub fn gifshare(store: MockObjectStore) -> GifShare {
    gifshare_with(store, MockFetcher::new(), MockBrowser::new())
}

/// Write `data` to `dir/file_name` and return the full path
pub fn fixture(dir: &Path, file_name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, data).expect("Failed to write fixture");
    path
}
