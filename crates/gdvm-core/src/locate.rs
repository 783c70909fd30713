//! Finding the engine executable inside an installed version.
//!
//! Each target OS lays the extracted engine out differently; exactly one
//! matching rule is compiled in. A lookup must find a single candidate:
//! zero is [`LocateError::NotFound`], several is
//! [`LocateError::Ambiguous`], never an arbitrary pick.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Deepest level searched below the install directory
/// (`Godot.app/Contents/MacOS/Godot` on macOS).
const MAX_DEPTH: usize = 4;

/// Failure to find a single engine executable.
#[derive(Error, Debug)]
pub enum LocateError {
    /// Nothing in the directory looks like the engine.
    #[error("no executable found in {}", dir.display())]
    NotFound {
        /// Install directory searched.
        dir: PathBuf,
    },

    /// More than one file looks like the engine.
    #[error("{} executables found in {}: {}", candidates.len(), dir.display(), list(candidates))]
    Ambiguous {
        /// Install directory searched.
        dir: PathBuf,
        /// Every matching path.
        candidates: Vec<PathBuf>,
    },

    /// The directory could not be walked.
    #[error("failed to scan install directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn list(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locates the single engine executable of an installed version.
pub trait ExecutableLocator: Send + Sync {
    /// Path of the executable inside `install_dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`LocateError`] unless exactly one candidate is found.
    fn locate(&self, install_dir: &Path) -> Result<PathBuf, LocateError>;
}

/// The locator for the OS gdvm was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformLocator;

impl ExecutableLocator for PlatformLocator {
    fn locate(&self, install_dir: &Path) -> Result<PathBuf, LocateError> {
        locate_matching(install_dir, imp::is_candidate)
    }
}

/// Walks `dir` and returns the one file whose path relative to `dir`
/// satisfies `is_candidate`.
///
/// # Errors
///
/// [`LocateError::NotFound`] or [`LocateError::Ambiguous`] unless exactly
/// one file matches; [`LocateError::Walk`] if the directory cannot be read.
pub fn locate_matching(
    dir: &Path,
    is_candidate: impl Fn(&Path) -> bool,
) -> Result<PathBuf, LocateError> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir).max_depth(MAX_DEPTH) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        if is_candidate(relative) {
            candidates.push(entry.into_path());
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(LocateError::NotFound {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(LocateError::Ambiguous {
            dir: dir.to_path_buf(),
            candidates,
        }),
    }
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

fn is_debug_variant(name: &str) -> bool {
    name.to_ascii_lowercase().contains("console")
}

#[cfg(any(target_os = "windows", test))]
mod windows {
    use std::path::Path;
    use std::sync::LazyLock;

    use regex::Regex;

    static EXECUTABLE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^Godot.*\.exe$").expect("valid pattern"));

    /// `Godot_v4.2.1-stable_win64.exe`, but not `..._console.exe`.
    pub(super) fn is_candidate(relative: &Path) -> bool {
        let name = super::file_name(relative);
        EXECUTABLE.is_match(name) && !super::is_debug_variant(name)
    }
}

#[cfg(any(target_os = "linux", test))]
mod linux {
    use std::path::Path;
    use std::sync::LazyLock;

    use regex::Regex;

    static EXECUTABLE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^Godot.*[._](x86_64|x86_32|arm64|arm32|64|32)$").expect("valid pattern")
    });

    /// `Godot_v4.2.1-stable_linux.x86_64` or `Godot_v3.5.3-stable_x11.64`.
    pub(super) fn is_candidate(relative: &Path) -> bool {
        let name = super::file_name(relative);
        EXECUTABLE.is_match(name) && !super::is_debug_variant(name)
    }
}

#[cfg(any(target_os = "macos", test))]
mod macos {
    use std::path::Path;

    /// `Godot.app/Contents/MacOS/Godot` (or `Godot_mono.app/...`).
    pub(super) fn is_candidate(relative: &Path) -> bool {
        let mut parts = relative.iter().rev();
        let (Some(exe), Some(macos), Some(contents), Some(bundle)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        exe == "Godot"
            && macos == "MacOS"
            && contents == "Contents"
            && bundle.to_str().is_some_and(|b| b.starts_with("Godot"))
            && Path::new(bundle).extension().is_some_and(|ext| ext == "app")
    }
}

#[cfg(target_os = "windows")]
use windows as imp;

#[cfg(target_os = "linux")]
use linux as imp;

#[cfg(target_os = "macos")]
use macos as imp;

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
mod imp {
    use std::path::Path;

    pub(super) fn is_candidate(_relative: &Path) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_single_windows_executable() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Godot_v4.2.1-stable_win64.exe");
        touch(dir.path(), "Godot_v4.2.1-stable_win64_console.exe");

        let found = locate_matching(dir.path(), windows::is_candidate).unwrap();
        assert_eq!(found, dir.path().join("Godot_v4.2.1-stable_win64.exe"));
    }

    #[test]
    fn test_no_executable_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Godot_v4.2.1-stable_win64_console.exe");
        touch(dir.path(), "README.txt");

        let err = locate_matching(dir.path(), windows::is_candidate).unwrap_err();
        assert!(matches!(err, LocateError::NotFound { .. }));
    }

    #[test]
    fn test_two_executables_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a/Godot_v4.2.1-stable_mono_win64.exe");
        touch(dir.path(), "b/Godot_v4.2.1-stable_mono_win64.exe");

        let err = locate_matching(dir.path(), windows::is_candidate).unwrap_err();
        match err {
            LocateError::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn test_linux_layouts() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            "Godot_v4.2.1-stable_mono_linux_x86_64/Godot_v4.2.1-stable_mono_linux.x86_64",
        );
        touch(
            dir.path(),
            "Godot_v4.2.1-stable_mono_linux_x86_64/GodotSharp/Api/Release/GodotSharp.dll",
        );

        let found = locate_matching(dir.path(), linux::is_candidate).unwrap();
        assert!(found.ends_with("Godot_v4.2.1-stable_mono_linux.x86_64"));

        assert!(linux::is_candidate(Path::new("Godot_v3.5.3-stable_x11.64")));
        assert!(!linux::is_candidate(Path::new("Godot_v4.2.1-stable_linux.x86_64.zip")));
    }

    #[test]
    fn test_macos_bundle() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Godot.app/Contents/MacOS/Godot");
        touch(dir.path(), "Godot.app/Contents/Resources/Godot.icns");

        let found = locate_matching(dir.path(), macos::is_candidate).unwrap();
        assert!(found.ends_with("Godot.app/Contents/MacOS/Godot"));
    }

    #[test]
    fn test_platform_locator_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlatformLocator.locate(dir.path()).unwrap_err();
        assert!(matches!(err, LocateError::NotFound { .. }));
    }
}
