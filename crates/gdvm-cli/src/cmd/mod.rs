//! One module per subcommand.

pub mod clean;
pub mod completions;
pub mod download;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod r#use;
pub mod versions;
pub mod which;
