use crate::errors::{GifshareError, Result};
use crate::image::classify::ImageKind;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Last run of characters after a `/` that contains neither `/` nor `.`.
static URL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*/([^/.]+)").expect("static pattern is valid"));

/// Where an upload's data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Url(&'a str),
    Path(&'a Path),
}

/// Derive the base name (no extension) for an upload.
///
/// A non-empty `name_override` is used verbatim.
pub fn resolve_name(source: Source<'_>, name_override: Option<&str>) -> Result<String> {
    if let Some(name) = name_override.filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }
    match source {
        Source::Url(url) => name_from_url(url),
        Source::Path(path) => name_from_path(path),
    }
}

/// `http://x/y/myfile.jpeg#.png` gives `myfile`.
pub fn name_from_url(url: &str) -> Result<String> {
    URL_NAME
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| GifshareError::InvalidName {
            name: url.to_string(),
            reason: "no file name could be derived from the URL".to_string(),
        })
}

/// File name of `path` without its final extension.
pub fn name_from_path(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| GifshareError::InvalidName {
            name: path.display().to_string(),
            reason: "no file name could be derived from the path".to_string(),
        })
}

/// Remote object name: base name, a dot, then the detected extension.
#[must_use]
pub fn object_name(base_name: &str, kind: ImageKind) -> String {
    format!("{}.{}", base_name, kind.extension())
}

/// Reject names that would escape the bucket namespace once appended to
/// the web root.
pub fn validate_object_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('/') {
        Some("name must not start with '/'")
    } else if name.contains('\\') {
        Some("name must not contain '\\'")
    } else if name.chars().any(char::is_control) {
        Some("name must not contain control characters")
    } else if name.split('/').any(|seg| seg == "." || seg == "..") {
        Some("name must not contain '.' or '..' path segments")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(GifshareError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
