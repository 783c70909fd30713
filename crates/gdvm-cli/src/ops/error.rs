//! Errors raised by lifecycle operations

use gdvm_core::io::{DownloadError, ExtractError};
use gdvm_core::{LinkError, LocateError, ResolveError};
use gdvm_schema::SpecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("Failed to resolve version: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Failed to find executable: {0}")]
    Locate(#[from] LocateError),

    #[error("Failed to activate version: {0}")]
    Link(#[from] LinkError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{context}: {source}")]
    Filesystem {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl OpsError {
    /// Wrap a filesystem failure with the step that hit it.
    pub fn fs(context: &'static str, source: std::io::Error) -> Self {
        Self::Filesystem { context, source }
    }

    /// True when nothing upstream matched the request.
    ///
    /// Resolution misses and transport 404s both count; callers report
    /// them and carry on.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Resolve(e) => e.is_not_found(),
            Self::Download(e) => e.is_not_found(),
            _ => false,
        }
    }
}
