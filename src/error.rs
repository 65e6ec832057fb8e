//! Error types for loading and querying posts

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading the post file or answering queries
#[derive(Error, Debug)]
pub enum Error {
    /// The posts file does not exist
    #[error("Unable to locate posts file at {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// No post carries the requested slug
    #[error("No post with slug '{slug}'")]
    PostNotFound { slug: String },

    /// No post carries the requested tag
    #[error("No posts tagged '{tag}'")]
    TagNotFound { tag: String },

    /// Two posts share a slug
    #[error("Duplicate post slug '{slug}'")]
    DuplicateSlug { slug: String },

    /// The posts file exists but does not match the expected schema
    #[error("Malformed posts file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    /// Reading the posts file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering a page failed
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl Error {
    /// Create a new malformed-input error
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error means "absent" rather than "broken"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. } | Self::PostNotFound { .. } | Self::TagNotFound { .. }
        )
    }
}
