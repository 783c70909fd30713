//! Lifecycle operations.
//!
//! Each operation takes a [`Context`] and reports outcomes through its
//! reporter. A request that matches nothing upstream is reported and
//! treated as success; everything else propagates as an [`OpsError`].

pub mod clean;
pub mod context;
pub mod error;
pub mod install;
pub mod list;
pub mod remove;
pub mod switch;
pub mod versions;

pub use context::Context;
pub use error::OpsError;

#[cfg(test)]
pub(crate) mod testing;

use gdvm_core::ArtifactKind;
use std::fmt::Display;

/// Turn a not-found outcome into `Ok(None)` after telling the user.
pub(crate) fn recover_not_found<T>(
    ctx: &Context,
    kind: ArtifactKind,
    request: &dyn Display,
    result: Result<T, OpsError>,
) -> Result<Option<T>, OpsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            tracing::debug!(error = %e, "nothing matched");
            ctx.reporter.info(&not_found_message(kind, request));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub(crate) fn not_found_message(kind: ArtifactKind, request: &dyn Display) -> String {
    format!(
        "{} {request} not found. Use 'gdvm versions list' to see available versions",
        kind.label()
    )
}
