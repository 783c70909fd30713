//! Fully resolved versions and their two canonical renderings.
//!
//! A [`Semver`] is a version quad bound to one upstream release and one mono
//! flavour. It renders to:
//!
//! - a *remote name* matching upstream asset names, `Godot_v4.2.1-stable_mono`
//! - a *local name* used as the install directory, `4.2.1.0-stable-mono`
//!
//! [`Semver::parse`] is the exact inverse of [`Semver::local_name`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::PRODUCT_PREFIX;
use crate::error::SpecError;
use crate::release::{Channel, ReleaseTag};
use crate::version::Version;

const MONO_MARKER: &str = "mono";

static LOCAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)-(dev|alpha|beta|rc|stable)(0|[1-9]\d*)?(-mono)?$",
    )
    .expect("local name pattern is valid")
});

/// A version fully bound to one upstream release and one mono value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Semver {
    /// Full version quad.
    pub version: Version,
    /// Resolved release channel and number.
    pub release: ReleaseTag,
    /// Mono (C#) flavour.
    pub mono: bool,
}

impl Semver {
    /// Bind a version, release and mono flag together.
    pub fn new(version: Version, release: ReleaseTag, mono: bool) -> Self {
        Self {
            version,
            release,
            mono,
        }
    }

    /// Upstream naming: `Godot_v<version>-<release>[_mono]`.
    ///
    /// Asset filenames are this name followed by `_<platform>.<ext>`.
    pub fn remote_name(&self) -> String {
        let mut name = format!(
            "{PRODUCT_PREFIX}_v{}-{}",
            self.version.remote_string(),
            self.release
        );
        if self.mono {
            name.push('_');
            name.push_str(MONO_MARKER);
        }
        name
    }

    /// Directory naming: `<major>.<minor>.<patch>.<build>-<release>[-mono]`.
    pub fn local_name(&self) -> String {
        let mut name = format!("{}-{}", self.version, self.release);
        if self.mono {
            name.push('-');
            name.push_str(MONO_MARKER);
        }
        name
    }

    /// Parses a local name back into a `Semver`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Unrecognized`] when `name` does not follow the
    /// local naming grammar. Callers enumerating directories should treat
    /// this as a per-entry skip.
    pub fn parse(name: &str) -> Result<Self, SpecError> {
        let unrecognized = || SpecError::Unrecognized(name.to_string());
        let caps = LOCAL_NAME.captures(name).ok_or_else(unrecognized)?;

        let mut parts = [0u32; 4];
        for (i, slot) in parts.iter_mut().enumerate() {
            *slot = caps[i + 1].parse().map_err(|_| unrecognized())?;
        }

        let channel: Channel = caps[5].parse().map_err(|_| unrecognized())?;
        let number = match caps.get(6) {
            Some(m) => Some(m.as_str().parse().map_err(|_| unrecognized())?),
            None => None,
        };
        if channel == Channel::Stable && number.is_some() {
            return Err(unrecognized());
        }

        Ok(Self {
            version: Version::new(parts[0], parts[1], parts[2], parts[3]),
            release: ReleaseTag { channel, number },
            mono: caps.get(7).is_some(),
        })
    }
}

impl fmt::Display for Semver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.version.remote_string(), self.release)?;
        if self.mono {
            write!(f, " {MONO_MARKER}")?;
        }
        Ok(())
    }
}

impl FromStr for Semver {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Outcome of interpreting one install-root entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// The entry name is a valid local name.
    Parsed(Semver),
    /// The entry is foreign to gdvm and should be skipped.
    Skip {
        /// Entry name as found on disk.
        name: String,
        /// Why it was skipped.
        reason: String,
    },
}

impl ListEntry {
    /// Classify a directory name without ever failing.
    pub fn classify(name: &str) -> Self {
        match Semver::parse(name) {
            Ok(semver) => Self::Parsed(semver),
            Err(e) => Self::Skip {
                name: name.to_string(),
                reason: e.to_string(),
            },
        }
    }
}
