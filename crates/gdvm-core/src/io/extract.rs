//! Archive extraction.
//!
//! Engine builds ship as `.zip`, export templates as `.tpz` (a zip with a
//! different extension), so a single zip implementation covers both.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use thiserror::Error;
use zip::ZipArchive;

/// Failure to unpack an archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Reading the archive or writing an entry failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive is corrupt or not a zip.
    #[error("Archive error: {0}")]
    Archive(String),
}

/// Unpacks an archive into a directory.
pub trait Archiver: Send + Sync {
    /// Extract `archive` into `dest`, returning the number of files written.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if the archive is unreadable or an entry
    /// cannot be written.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractError>;
}

/// [`Archiver`] for zip-family archives.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractError> {
        tracing::debug!(archive = %archive.display(), dest = %dest.display(), "extracting");

        let file = File::open(archive)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| ExtractError::Archive(e.to_string()))?;

        fs::create_dir_all(dest)?;
        let mut written = 0;

        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| ExtractError::Archive(e.to_string()))?;
            // Entries escaping the destination (Zip Slip) have no enclosed name.
            let Some(relative_path) = entry.enclosed_name() else {
                continue;
            };

            let absolute_path = dest.join(&relative_path);
            if entry.is_dir() {
                fs::create_dir_all(&absolute_path)?;
                continue;
            }

            if let Some(p) = absolute_path.parent() {
                fs::create_dir_all(p)?;
            }

            let mut outfile = File::create(&absolute_path)?;
            io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    fs::set_permissions(&absolute_path, fs::Permissions::from_mode(mode))?;
                }
            }

            written += 1;
        }

        Ok(written)
    }
}
