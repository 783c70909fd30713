//! Terminal output.
//!
//! - [`theme`] - Colors, icons and size formatting
//! - [`output`] - The [`Output`] reporter used by every command
//! - [`list`] - Column layout for version listings

pub mod list;
pub mod output;
pub mod theme;

pub use output::Output;
pub use theme::Theme;
