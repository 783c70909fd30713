//! Numeric version quads and partially specified user requests.

use std::fmt;
use std::str::FromStr;

use crate::error::SpecError;
use crate::release::ReleaseTag;

/// Number of numeric components in a fully qualified version.
pub const COMPONENTS: usize = 4;

/// A fully qualified `major.minor.patch.build` version.
///
/// Ordering is lexicographic over the components, which matches how
/// upstream versions are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version([u32; COMPONENTS]);

impl Version {
    /// Build a version from its four components.
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self([major, minor, patch, build])
    }

    /// All four components, most significant first.
    pub const fn components(&self) -> [u32; COMPONENTS] {
        self.0
    }

    /// Component at `index` (0 = major, 3 = build).
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub const fn component(&self, index: usize) -> u32 {
        self.0[index]
    }

    /// Renders the version the way upstream asset names do.
    ///
    /// Trailing zero components are dropped, but `major.minor` is always
    /// kept: `4.2.0.0` becomes `4.2`, `4.2.1.0` becomes `4.2.1`.
    pub fn remote_string(&self) -> String {
        let mut len = COMPONENTS;
        while len > 2 && self.0[len - 1] == 0 {
            len -= 1;
        }
        join(&self.0[..len])
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join(&self.0))
    }
}

impl FromStr for Version {
    type Err = SpecError;

    /// Parses one to four dot-separated components; missing ones are zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_components(s)?;
        let mut out = [0; COMPONENTS];
        for (slot, value) in out.iter_mut().zip(parts) {
            *slot = value;
        }
        Ok(Self(out))
    }
}

/// A user's, possibly partial, request for one engine build.
///
/// Components are ordered major, minor, patch, build; any trailing run may
/// be unspecified. The release filter defaults to `stable`, and the mono
/// flag is always explicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    components: [Option<u32>; COMPONENTS],
    release: ReleaseTag,
    mono: bool,
}

impl VersionSpec {
    /// Parses a version string (`x.x`, `x.x.x` or `x.x.x.x`) and a release
    /// string (`stable`, `beta3`, `rc`) into a spec.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidSpec`] for more than four components, a
    /// non-numeric component, or an unknown release channel.
    pub fn build(version: &str, release: &str, mono: bool) -> Result<Self, SpecError> {
        let parts = split_components(version)?;
        let mut components = [None; COMPONENTS];
        for (slot, value) in components.iter_mut().zip(parts) {
            *slot = Some(value);
        }

        Ok(Self {
            components,
            release: release.parse()?,
            mono,
        })
    }

    /// Assemble a spec from already validated parts.
    pub fn from_parts(
        components: [Option<u32>; COMPONENTS],
        release: ReleaseTag,
        mono: bool,
    ) -> Self {
        Self {
            components,
            release,
            mono,
        }
    }

    /// Requested component at `index`, `None` when left open.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn component(&self, index: usize) -> Option<u32> {
        self.components[index]
    }

    /// All requested components, most significant first.
    pub fn components(&self) -> &[Option<u32>; COMPONENTS] {
        &self.components
    }

    /// Release channel filter.
    pub fn release(&self) -> &ReleaseTag {
        &self.release
    }

    /// Whether the mono (C#) flavour is requested.
    pub fn mono(&self) -> bool {
        self.mono
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let given: Vec<u32> = self.components.iter().map_while(|c| *c).collect();
        write!(f, "{}-{}", join(&given), self.release)?;
        if self.mono {
            f.write_str(" mono")?;
        }
        Ok(())
    }
}

fn split_components(s: &str) -> Result<Vec<u32>, SpecError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SpecError::InvalidSpec("empty version".to_string()));
    }

    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() > COMPONENTS {
        return Err(SpecError::InvalidSpec(format!(
            "'{s}' has more than {COMPONENTS} components"
        )));
    }

    parts
        .into_iter()
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SpecError::InvalidSpec(format!(
                    "'{part}' in '{s}' is not a number"
                )));
            }
            part.parse::<u32>()
                .map_err(|_| SpecError::InvalidSpec(format!("'{part}' in '{s}' is out of range")))
        })
        .collect()
}

fn join(parts: &[u32]) -> String {
    parts
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
