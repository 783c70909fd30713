//! List command
use crate::ops::{self, Context};
use crate::ui::list::print_versions;
use anyhow::Result;
use gdvm_core::ArtifactKind;

/// List installed versions of `kind`
pub fn list(ctx: &Context, kind: ArtifactKind) -> Result<()> {
    let versions = ops::list::installed(&ctx.config, kind)?;
    print_versions(
        &versions,
        &format!("No {} versions installed.", kind.label()),
    );
    Ok(())
}
