//! Cache cleanup.

use crate::ops::OpsError;
use gdvm_core::{ArtifactKind, Config};
use std::fs;
use std::io;

/// Delete every cached archive (including partial downloads) of both
/// artifact kinds. Returns the number of files removed.
pub fn clean_cache(config: &Config) -> Result<usize, OpsError> {
    let mut removed = 0;
    for kind in [ArtifactKind::Engine, ArtifactKind::Templates] {
        let dir = config.cache_dir(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(OpsError::fs("Failed to read cache", e)),
        };

        for entry in entries {
            let path = entry
                .map_err(|e| OpsError::fs("Failed to read cache", e))?
                .path();
            if path.is_file() {
                fs::remove_file(&path)
                    .map_err(|e| OpsError::fs("Failed to remove cached archive", e))?;
                tracing::debug!(path = %path.display(), "removed");
                removed += 1;
            }
        }
    }
    Ok(removed)
}
