//! Download and install.
//!
//! Archives are cached under `<home>/cache/<kind>/<asset name>` and
//! extracted into `<home>/<kind>/<local name>`. Both steps are skipped when
//! their target is already present.
//!
//! The install check only looks at whether the target directory exists.
//! An extraction that fails halfway leaves the directory behind, and the
//! next install reports it as already installed.

use crate::ops::{Context, OpsError, recover_not_found};
use gdvm_core::{ArtifactKind, Asset};
use gdvm_schema::{Semver, VersionSpec};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Download the archive for `spec` into the cache.
///
/// Returns the cached path, or `None` when nothing upstream matched.
pub async fn download(
    ctx: &Context,
    spec: &VersionSpec,
    kind: ArtifactKind,
) -> Result<Option<PathBuf>, OpsError> {
    let result = download_resolved(ctx, spec, kind).await;
    recover_not_found(ctx, kind, spec, result)
}

/// Download and extract `spec`.
///
/// Returns the install directory, or `None` when nothing upstream matched.
pub async fn install(
    ctx: &Context,
    spec: &VersionSpec,
    kind: ArtifactKind,
) -> Result<Option<PathBuf>, OpsError> {
    let result = install_resolved(ctx, spec, kind).await;
    recover_not_found(ctx, kind, spec, result)
}

async fn download_resolved(
    ctx: &Context,
    spec: &VersionSpec,
    kind: ArtifactKind,
) -> Result<PathBuf, OpsError> {
    let (semver, asset) = ctx.env.fetch_asset(spec, kind).await?;
    cached_archive(ctx, &semver, &asset, kind).await
}

async fn install_resolved(
    ctx: &Context,
    spec: &VersionSpec,
    kind: ArtifactKind,
) -> Result<PathBuf, OpsError> {
    let (semver, asset) = ctx.env.fetch_asset(spec, kind).await?;
    let root = ctx.config.install_root(kind);
    let target = root.join(semver.local_name());

    if target.exists() {
        ctx.reporter
            .info(&format!("{} {semver} already installed", kind.label()));
        return Ok(target);
    }

    fs::create_dir_all(&root).map_err(|e| OpsError::fs("Failed to create install root", e))?;
    remove_stale(&target)?;

    let archive = cached_archive(ctx, &semver, &asset, kind).await?;

    tracing::debug!(archive = %archive.display(), target = %target.display(), "extracting");
    let files = ctx.archiver.extract(&archive, &target)?;
    tracing::debug!(files, "extracted");

    ctx.reporter
        .success(&format!("Installed {} {semver}", kind.label()));
    Ok(target)
}

/// Cache path of `asset`, downloading it first if absent.
async fn cached_archive(
    ctx: &Context,
    semver: &Semver,
    asset: &Asset,
    kind: ArtifactKind,
) -> Result<PathBuf, OpsError> {
    let path = ctx.config.cache_dir(kind).join(&asset.name);
    if path.exists() {
        ctx.reporter
            .info(&format!("{} {semver} already downloaded", kind.label()));
        return Ok(path);
    }

    tracing::debug!(url = %asset.download_url, path = %path.display(), "downloading archive");
    let bytes = ctx
        .transport
        .download(&asset.download_url, &path, ctx.reporter.as_ref())
        .await?;

    ctx.reporter.success(&format!(
        "Downloaded {} ({})",
        asset.name,
        crate::ui::theme::format_size(bytes)
    ));
    Ok(path)
}

/// Clear whatever occupies `target` (e.g. a dangling link).
fn remove_stale(target: &Path) -> Result<(), OpsError> {
    let result = match fs::symlink_metadata(target) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(target),
        Ok(_) => fs::remove_file(target),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => Err(e),
    };
    result.map_err(|e| OpsError::fs("Failed to remove stale install", e))?;
    tracing::debug!(target = %target.display(), "removed stale install entry");
    Ok(())
}
