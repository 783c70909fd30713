//! Clean command
use crate::ops::{self, Context};
use anyhow::Result;

/// Delete cached archives
pub fn clean(ctx: &Context) -> Result<()> {
    let removed = ops::clean::clean_cache(&ctx.config)?;
    if removed == 0 {
        ctx.reporter.info("Cache is already empty");
    } else {
        ctx.reporter.success(&format!(
            "Removed {} cached archive{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
    }
    Ok(())
}
