//! Error type shared by spec parsing and local-name parsing.

use thiserror::Error;

/// Errors raised while interpreting user input or on-disk names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Malformed version or release string supplied by the user.
    #[error("invalid version spec: {0}")]
    InvalidSpec(String),

    /// A directory name does not follow the local naming grammar.
    #[error("unrecognized version name '{0}'")]
    Unrecognized(String),
}
