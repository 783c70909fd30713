//! Uninstall command
use crate::VersionArgs;
use crate::ops::{self, Context};
use anyhow::Result;
use gdvm_core::ArtifactKind;

/// Remove an installed version. `quiet` silences the not-installed notice.
pub async fn uninstall(
    ctx: &Context,
    kind: ArtifactKind,
    args: &VersionArgs,
    quiet: bool,
) -> Result<()> {
    let spec = args.spec()?;
    ops::remove::uninstall(ctx, &spec, kind, !quiet).await?;
    Ok(())
}
