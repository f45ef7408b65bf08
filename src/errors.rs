use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GifshareError {
    #[error("Unknown file type: {description}")]
    UnknownFileType { description: String },

    #[error("File at {url} already exists!")]
    FileAlreadyExists { url: String },

    #[error("The image '{name}' does not exist")]
    MissingFile { name: String },

    #[error("{} does not exist or is not a file!", path.display())]
    LocalFileNotFound { path: PathBuf },

    #[error("Invalid image name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("The bucket does not contain any images")]
    EmptyBucket,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Storage error during {operation}: {message}")]
    Storage { operation: String, message: String },
}

impl GifshareError {
    /// Errors the user can fix themselves. These are reported as a single
    /// line without any further diagnostics.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownFileType { .. }
                | Self::FileAlreadyExists { .. }
                | Self::MissingFile { .. }
                | Self::LocalFileNotFound { .. }
                | Self::InvalidName { .. }
                | Self::EmptyBucket
        )
    }

    pub(crate) fn storage(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Storage {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GifshareError>;
