//! Use command
use crate::VersionArgs;
use crate::ops::{self, Context};
use anyhow::Result;
use gdvm_core::link::LINK_FILENAME;

/// Make an installed engine version the active `godot`
pub async fn use_version(ctx: &Context, args: &VersionArgs) -> Result<()> {
    let spec = args.spec()?;
    if ops::switch::use_version(ctx, &spec).await?.is_some() {
        warn_if_shadowed(ctx);
    }
    Ok(())
}

/// Warn when `godot` on the PATH is not the link gdvm manages.
fn warn_if_shadowed(ctx: &Context) {
    let link = ctx.config.link_path();
    match which::which(LINK_FILENAME) {
        Ok(found) if found == link => {}
        Ok(found) => ctx.reporter.warning(&format!(
            "'{}' resolves to {} first on your PATH",
            LINK_FILENAME,
            found.display()
        )),
        Err(_) => ctx.reporter.warning(&format!(
            "{} is not on your PATH",
            ctx.config.bin_dir().display()
        )),
    }
}
