use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Streamline file not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported streamline format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid header in {path}: {reason}")]
    InvalidHeader { path: String, reason: String },

    #[error("Truncated streamline data in {path}: {reason}")]
    Truncated { path: String, reason: String },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn header(path: &Path, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn truncated(path: &Path, reason: impl Into<String>) -> Self {
        Self::Truncated {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
