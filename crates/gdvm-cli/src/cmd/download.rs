//! Download command
use crate::VersionArgs;
use crate::ops::{self, Context};
use anyhow::Result;
use gdvm_core::ArtifactKind;

/// Download an archive into the cache without extracting it
pub async fn download(ctx: &Context, kind: ArtifactKind, args: &VersionArgs) -> Result<()> {
    let spec = args.spec()?;
    ops::install::download(ctx, &spec, kind).await?;
    Ok(())
}
