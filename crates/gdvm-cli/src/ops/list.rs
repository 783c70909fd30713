//! Enumerating installed versions.
//!
//! The install root is the registry: every subdirectory whose name parses
//! as a local name is an installed version. Anything else is skipped.

use crate::ops::OpsError;
use gdvm_core::{ArtifactKind, Config};
use gdvm_schema::{ListEntry, Semver};
use std::fs;
use std::io;

/// Installed versions of `kind`, in directory enumeration order.
///
/// A missing install root yields an empty list.
pub fn installed(config: &Config, kind: ArtifactKind) -> Result<Vec<Semver>, OpsError> {
    let root = config.install_root(kind);
    let entries = match fs::read_dir(&root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(OpsError::fs("Failed to read install root", e)),
    };

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OpsError::fs("Failed to read install root", e))?;
        // Follows symlinks, so a version directory linked in from elsewhere counts.
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name();
        match ListEntry::classify(&name.to_string_lossy()) {
            ListEntry::Parsed(semver) => versions.push(semver),
            ListEntry::Skip { name, reason } => {
                tracing::debug!(%name, %reason, "skipping install entry");
            }
        }
    }
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdvm_schema::{Channel, ReleaseTag, Version};

    #[test]
    fn test_missing_root_is_empty() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::with_home(home.path());

        assert!(installed(&config, ArtifactKind::Engine).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_entries_are_skipped() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::with_home(home.path());
        let root = config.install_root(ArtifactKind::Engine);
        fs::create_dir_all(root.join("4.2.1.0-stable")).unwrap();
        fs::create_dir_all(root.join("4.3.0.0-beta2-mono")).unwrap();
        fs::create_dir_all(root.join("my-projects")).unwrap();
        fs::write(root.join("4.1.0.0-stable"), b"not a directory").unwrap();

        let mut versions = installed(&config, ArtifactKind::Engine).unwrap();
        versions.sort();

        assert_eq!(
            versions,
            vec![
                Semver::new(Version::new(4, 2, 1, 0), ReleaseTag::stable(), false),
                Semver::new(
                    Version::new(4, 3, 0, 0),
                    ReleaseTag::numbered(Channel::Beta, 2),
                    true
                ),
            ]
        );
    }

    #[test]
    fn test_kinds_are_listed_separately() {
        let home = tempfile::tempdir().unwrap();
        let config = Config::with_home(home.path());
        fs::create_dir_all(config.install_root(ArtifactKind::Templates).join("4.2.1.0-stable"))
            .unwrap();

        assert!(installed(&config, ArtifactKind::Engine).unwrap().is_empty());
        assert_eq!(installed(&config, ArtifactKind::Templates).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_version_directory_is_listed() {
        let home = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let config = Config::with_home(home.path());
        let root = config.install_root(ArtifactKind::Engine);
        fs::create_dir_all(&root).unwrap();

        let real = elsewhere.path().join("godot-4.2.1");
        fs::create_dir_all(&real).unwrap();
        std::os::unix::fs::symlink(&real, root.join("4.2.1.0-stable")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("gone"), root.join("4.0.0.0-stable"))
            .unwrap();

        let versions = installed(&config, ArtifactKind::Engine).unwrap();

        assert_eq!(
            versions,
            vec![Semver::new(Version::new(4, 2, 1, 0), ReleaseTag::stable(), false)]
        );
    }
}
