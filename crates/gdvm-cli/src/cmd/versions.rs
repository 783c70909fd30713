//! Versions command
use crate::ops::{self, Context};
use crate::ui::list::print_versions;
use anyhow::Result;
use gdvm_core::platform::CURRENT;
use gdvm_schema::ReleaseTag;

/// List upstream versions that ship a build for this platform
pub async fn list(ctx: &Context, release: Option<&str>, mono: bool) -> Result<()> {
    let release = release.map(str::parse::<ReleaseTag>).transpose()?;
    let versions = ops::versions::available(ctx, release.as_ref(), mono).await?;
    print_versions(
        &versions,
        &format!("No versions available for {}.", CURRENT.name),
    );
    Ok(())
}
