use crate::error::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
///
/// Every field is optional in the file; missing keys fall back to empty
/// values so a config that only sets `base_url` still builds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix for every link, canonical URL and asset reference
    pub base_url: String,
    pub keywords: Vec<String>,
    pub author: AuthorConfig,
    pub site_title: String,
    pub site_tagline: String,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub org: String,
    pub contact_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub output: String,
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "pretty".to_string(),
            file_path: String::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a JSON or TOML file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config: SiteConfig = if is_json {
            serde_json::from_str(&contents)
                .map_err(|e| SiteError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            toml::from_str(&contents)
                .map_err(|e| SiteError::Config(format!("{}: {}", path.display(), e)))?
        };

        config.normalized()
    }

    /// `CONFIG_FILE` if set, else `config.json` under the project root
    pub fn default_path(root: &Path) -> PathBuf {
        std::env::var("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| root.join("config.json"))
    }

    /// Strip trailing slashes from `base_url` and validate it
    pub fn normalized(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&self.base_url)?;
        Ok(self)
    }
}

/// Empty (site root), root-relative path, or absolute URL.
fn validate_base_url(base_url: &str) -> Result<()> {
    if base_url.is_empty() || base_url.starts_with('/') {
        return Ok(());
    }

    match url::Url::parse(base_url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => Ok(()),
        _ => Err(SiteError::InvalidBaseUrl(base_url.to_string())),
    }
}
