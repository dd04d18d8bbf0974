//! Errors raised while reading or writing studbook files.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("JSON encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty {0}")]
    Empty(&'static str),

    #[error("Unreadable pedigree certificate: {0}")]
    Certificate(String),

    /// Stable backup that fails rkyv validation or decoding.
    #[error("Corrupt stable backup: {0}")]
    Backup(String),

    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Could not {action} {}: {source}", .path.display())]
    FileSystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// File failure on `path`; a missing file becomes [`IoError::NotFound`].
    #[must_use]
    pub fn file(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path.to_path_buf());
        }
        Self::FileSystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error under any context layers.
    #[must_use]
    pub fn root(&self) -> &IoError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
