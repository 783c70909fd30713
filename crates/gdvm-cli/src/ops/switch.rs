//! Switching the active engine version.

use crate::ops::{Context, OpsError, recover_not_found};
use gdvm_core::{ArtifactKind, link};
use gdvm_schema::VersionSpec;
use std::path::PathBuf;

/// Point the `godot` link at the executable of the installed `spec`.
///
/// Returns the executable now active, or `None` when the version is
/// unknown upstream or not installed (both are reported).
pub async fn use_version(ctx: &Context, spec: &VersionSpec) -> Result<Option<PathBuf>, OpsError> {
    let kind = ArtifactKind::Engine;
    let resolved = ctx.env.resolve_version(spec).await.map_err(OpsError::from);
    let Some(semver) = recover_not_found(ctx, kind, spec, resolved)? else {
        return Ok(None);
    };

    let install_dir = ctx.config.install_root(kind).join(semver.local_name());
    if !install_dir.is_dir() {
        ctx.reporter.info(&format!(
            "{} {semver} is not installed. Run 'gdvm godot install' first",
            kind.label()
        ));
        return Ok(None);
    }

    let executable = ctx.locator.locate(&install_dir)?;
    link::publish(&executable, &ctx.config.link_path())?;

    ctx.reporter
        .success(&format!("{} {semver} is now active", kind.label()));
    Ok(Some(executable))
}

/// The executable the `godot` link points at, if any.
pub fn active(ctx: &Context) -> Option<PathBuf> {
    link::current(&ctx.config.link_path())
}
