use crate::errors::{GifshareError, Result};
use crate::utils::log_utils::mask_secret;
use home::home_dir;
use ini::Ini;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in `~` and the working directory
pub const CONFIG_FILE_NAME: &str = ".gifshare";
/// INI section holding the settings
pub const CONFIG_SECTION: &str = "default";
pub const DEFAULT_REGION: &str = "us-east-1";

const REQUIRED_KEYS: [&str; 4] = ["aws_access_id", "aws_secret_access_key", "bucket", "web_root"];

/// Connection settings for the image bucket. Loaded once, never changed.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub access_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Prefix for public object URLs, used verbatim
    pub web_root: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores
    pub endpoint: Option<String>,
}

impl StoreConfig {
    /// Load `~/.gifshare` then `./.gifshare`, later values winning.
    pub fn load() -> Result<Self> {
        Self::load_from_paths(&default_paths())
    }

    /// Load and merge the `[default]` section of every existing file in `paths`.
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut values = HashMap::new();
        for path in paths.iter().filter(|p| p.is_file()) {
            merge_file(path, &mut values)?;
        }
        Self::from_values(&values)
    }

    /// Build from already-merged key/value pairs.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let missing: Vec<&str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(GifshareError::Config(format!(
                "missing required setting(s) in [{}]: {}",
                CONFIG_SECTION,
                missing.join(", ")
            )));
        }

        Ok(Self {
            access_id: get("aws_access_id").unwrap_or_default(),
            secret_access_key: get("aws_secret_access_key").unwrap_or_default(),
            bucket: get("bucket").unwrap_or_default(),
            web_root: get("web_root").unwrap_or_default(),
            region: get("region").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint: get("endpoint"),
        })
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("access_id", &mask_secret(&self.access_id))
            .field("secret_access_key", &"****")
            .field("bucket", &self.bucket)
            .field("web_root", &self.web_root)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// `~/.gifshare` (when a home directory exists) followed by `./.gifshare`.
#[must_use]
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = home_dir() {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

fn merge_file(path: &Path, values: &mut HashMap<String, String>) -> Result<()> {
    // Backslashes are kept literally; secret keys may contain them
    let conf = Ini::load_from_file_noescape(path).map_err(|e| {
        GifshareError::Config(format!("unable to read '{}': {}", path.display(), e))
    })?;

    if let Some(section) = conf.section(Some(CONFIG_SECTION)) {
        for (key, value) in section.iter() {
            values.insert(key.to_lowercase(), value.to_string());
        }
    }
    Ok(())
}
