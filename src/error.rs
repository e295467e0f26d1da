use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a site build.
///
/// Bad rows and missing columns never end up here; they degrade to
/// table rows without a detail page.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no snapshot data found in {path}: {reason}")]
    NoDataFound { path: PathBuf, reason: String },

    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid base_url {0:?}: expected an absolute URL or a path starting with '/'")]
    InvalidBaseUrl(String),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
