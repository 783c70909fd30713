//! Install command
use crate::VersionArgs;
use crate::ops::{self, Context};
use anyhow::Result;
use gdvm_core::ArtifactKind;

/// Download and extract a version
pub async fn install(ctx: &Context, kind: ArtifactKind, args: &VersionArgs) -> Result<()> {
    let spec = args.spec()?;
    if let Some(dir) = ops::install::install(ctx, &spec, kind).await? {
        tracing::debug!(dir = %dir.display(), "install ready");
    }
    Ok(())
}
