//! Publishing the active-version link.
//!
//! The link at `<home>/bin/godot` is replaced by creating a fresh link
//! beside it and renaming it over the old one, so a concurrent reader
//! sees either the previous target or the new one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the published link.
#[cfg(windows)]
pub const LINK_FILENAME: &str = "godot.exe";
/// File name of the published link.
#[cfg(not(windows))]
pub const LINK_FILENAME: &str = "godot";

/// Failure to repoint the active-version link.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The executable to link to is gone.
    #[error("link target does not exist: {}", .0.display())]
    MissingTarget(PathBuf),

    /// Creating or renaming the link failed.
    #[error("failed to publish link {}: {source}", link.display())]
    Io {
        /// Link being published.
        link: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Point `link` at `target`, replacing any existing link atomically.
///
/// # Errors
///
/// Returns [`LinkError::MissingTarget`] if `target` does not exist and
/// [`LinkError::Io`] if the link cannot be created or renamed into place.
pub fn publish(target: &Path, link: &Path) -> Result<(), LinkError> {
    if !target.exists() {
        return Err(LinkError::MissingTarget(target.to_path_buf()));
    }
    let io_err = |source| LinkError::Io {
        link: link.to_path_buf(),
        source,
    };

    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let staged = staging_path(link);
    // Leftover from an interrupted publish.
    if staged.symlink_metadata().is_ok() {
        fs::remove_file(&staged).map_err(io_err)?;
    }

    make_link(target, &staged).map_err(io_err)?;
    if let Err(e) = fs::rename(&staged, link) {
        let _ = fs::remove_file(&staged);
        return Err(io_err(e));
    }

    tracing::debug!(link = %link.display(), target = %target.display(), "published link");
    Ok(())
}

/// Target of the published link, if one exists.
pub fn current(link: &Path) -> Option<PathBuf> {
    fs::read_link(link).ok()
}

fn staging_path(link: &Path) -> PathBuf {
    let mut name = link.file_name().unwrap_or_default().to_os_string();
    name.push(".new");
    link.with_file_name(name)
}

#[cfg(unix)]
fn make_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_link(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
