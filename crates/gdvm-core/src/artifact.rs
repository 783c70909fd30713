//! The two artifact sets gdvm manages side by side.

use std::fmt;

use gdvm_schema::Semver;

use crate::platform::{CURRENT, Platform};

const TEMPLATES_SUFFIX: &str = "export_templates";

/// Engine builds or their export templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The editor/engine executable archive.
    Engine,
    /// Export (build) templates, platform independent.
    Templates,
}

impl ArtifactKind {
    /// Folder name used under both the cache and the home directory.
    pub fn folder(self) -> &'static str {
        match self {
            Self::Engine => "godot",
            Self::Templates => "templates",
        }
    }

    /// Label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Engine => "Godot",
            Self::Templates => "Build templates",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Engine => "zip",
            Self::Templates => "tpz",
        }
    }

    /// Every asset filename upstream may use for `semver` on `platform`.
    pub fn asset_names_for(self, semver: &Semver, platform: &Platform) -> Vec<String> {
        let remote = semver.remote_name();
        let ext = self.extension();
        match self {
            Self::Engine => platform
                .suffixes(semver.mono)
                .iter()
                .map(|suffix| format!("{remote}_{suffix}.{ext}"))
                .collect(),
            Self::Templates => vec![format!("{remote}_{TEMPLATES_SUFFIX}.{ext}")],
        }
    }

    /// Asset filenames for `semver` on the platform gdvm was built for.
    pub fn asset_names(self, semver: &Semver) -> Vec<String> {
        self.asset_names_for(semver, &CURRENT)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
