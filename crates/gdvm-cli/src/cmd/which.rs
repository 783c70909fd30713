//! Which command
use crate::ops::{self, Context};
use anyhow::Result;

/// Print the executable behind the `godot` link
pub fn which(ctx: &Context) -> Result<()> {
    match ops::switch::active(ctx) {
        Some(path) => println!("{}", path.display()),
        None => ctx.reporter.info("No active version. Run 'gdvm godot use <version>'"),
    }
    Ok(())
}
