//! Well-known locations.

use std::path::PathBuf;

/// Environment variable overriding the gdvm home directory.
pub const HOME_ENV: &str = "GDVM_HOME";

/// Returns the gdvm home directory, or None if no data directory can be resolved.
///
/// `GDVM_HOME` wins; otherwise the platform's local data directory is used
/// (`~/.local/share/gdvm`, `%LOCALAPPDATA%\gdvm`, `~/Library/Application Support/gdvm`).
pub fn try_gdvm_home() -> Option<PathBuf> {
    if let Some(val) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(val));
    }
    dirs::data_local_dir().map(|d| d.join("gdvm"))
}

/// Extract the filename from a URL.
pub fn filename_from_url(url: &str) -> &str {
    url.split('/').next_back().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://example.com/download/4.2.1-stable/Godot_v4.2.1-stable_linux.x86_64.zip"),
            "Godot_v4.2.1-stable_linux.x86_64.zip"
        );
        assert_eq!(filename_from_url(""), "");
    }
}
