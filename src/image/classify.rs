use crate::errors::{GifshareError, Result};
use crate::interfaces::SignatureDetector;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static KIND_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"JPEG|GIF|PNG").expect("static pattern is valid"));

/// The image formats gifshare will store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Gif,
    Jpeg,
    Png,
}

impl ImageKind {
    /// Extension appended to remote object names
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// Content-type stored against the remote object
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "GIF" => Some(Self::Gif),
            "JPEG" => Some(Self::Jpeg),
            "PNG" => Some(Self::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Map a detector description to an image kind.
///
/// The earliest of `JPEG`, `GIF` or `PNG` in the text wins. Matching is
/// case-sensitive.
pub fn classify_description(description: &str) -> Result<ImageKind> {
    KIND_TOKEN
        .find(description)
        .and_then(|m| ImageKind::from_token(m.as_str()))
        .ok_or_else(|| GifshareError::UnknownFileType {
            description: description.to_string(),
        })
}

/// Content classifier: sniffs data with a signature detector and maps the
/// result onto an `ImageKind`.
pub struct Classifier {
    detector: Box<dyn SignatureDetector>,
}

impl Classifier {
    pub fn new(detector: Box<dyn SignatureDetector>) -> Self {
        Self { detector }
    }

    pub fn classify_bytes(&self, data: &[u8]) -> Result<ImageKind> {
        classify_description(&self.detector.describe_bytes(data))
    }

    pub fn classify_file(&self, path: &Path) -> Result<ImageKind> {
        let description = self.detector.describe_file(path)?;
        classify_description(&description)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Box::new(crate::interfaces::InferDetector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::MockSignatureDetector;

    #[test]
    fn test_tokens_map_to_kinds() {
        assert_eq!(
            classify_description("PNG image data, 10 x 10, 8-bit/color RGBA").unwrap(),
            ImageKind::Png
        );
        assert_eq!(
            classify_description("GIF image data, version 89a, 1 x 1").unwrap(),
            ImageKind::Gif
        );
        assert_eq!(
            classify_description("JPEG image data, JFIF standard 1.01").unwrap(),
            ImageKind::Jpeg
        );
    }

    #[test]
    fn test_first_token_wins() {
        assert_eq!(
            classify_description("GIF wrapped in a PNG").unwrap(),
            ImageKind::Gif
        );
        assert_eq!(
            classify_description("xPNGx then JPEG").unwrap(),
            ImageKind::Png
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let err = classify_description("png image data").unwrap_err();
        match err {
            GifshareError::UnknownFileType { description } => {
                assert_eq!(description, "png image data");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_description_fails() {
        assert!(matches!(
            classify_description("ASCII text"),
            Err(GifshareError::UnknownFileType { .. })
        ));
        assert!(classify_description("").is_err());
    }

    #[test]
    fn test_kind_metadata() {
        assert_eq!(ImageKind::Jpeg.extension(), "jpeg");
        assert_eq!(ImageKind::Jpeg.content_type(), "image/jpeg");
        assert_eq!(ImageKind::Gif.content_type(), "image/gif");
        assert_eq!(ImageKind::Png.to_string(), "png");
    }

    #[test]
    fn test_classifier_uses_detector_output() {
        let mut detector = MockSignatureDetector::new();
        detector
            .expect_describe_bytes()
            .returning(|_| "GIF image data, version 89a".to_string());
        let classifier = Classifier::new(Box::new(detector));
        assert_eq!(classifier.classify_bytes(b"anything").unwrap(), ImageKind::Gif);
    }

    #[test]
    fn test_default_classifier_sniffs_real_signatures() {
        let classifier = Classifier::default();
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0];
        let gif = *b"GIF89a\x01\x00\x01\x00\x00\x00";

        assert_eq!(classifier.classify_bytes(&png).unwrap(), ImageKind::Png);
        assert_eq!(classifier.classify_bytes(&jpeg).unwrap(), ImageKind::Jpeg);
        assert_eq!(classifier.classify_bytes(&gif).unwrap(), ImageKind::Gif);
        assert!(classifier.classify_bytes(b"just some text").is_err());
    }
}
