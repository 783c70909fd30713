//! Release channels (`dev`, `alpha`, `beta`, `rc`, `stable`) and upstream tags.

use std::fmt;
use std::str::FromStr;

use crate::error::SpecError;
use crate::version::Version;

/// Upstream release channel, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    /// Development snapshot (`dev1`, `dev2`, ...).
    Dev,
    /// Alpha pre-release.
    Alpha,
    /// Beta pre-release.
    Beta,
    /// Release candidate.
    Rc,
    /// Stable release; never carries a number.
    Stable,
}

impl Channel {
    /// Keyword used in tags, asset names and directory names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "rc",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "alpha" => Ok(Self::Alpha),
            "beta" => Ok(Self::Beta),
            "rc" => Ok(Self::Rc),
            "stable" => Ok(Self::Stable),
            _ => Err(SpecError::InvalidSpec(format!("unknown release channel '{s}'"))),
        }
    }
}

/// A channel plus its optional number, e.g. `beta3` or `stable`.
///
/// Used both as the user's release filter and as the resolved release of an
/// upstream build. As a filter, a missing number matches every number of the
/// channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReleaseTag {
    /// Release channel.
    pub channel: Channel,
    /// Channel number; always `None` for [`Channel::Stable`].
    pub number: Option<u32>,
}

impl ReleaseTag {
    /// The `stable` release.
    pub const fn stable() -> Self {
        Self {
            channel: Channel::Stable,
            number: None,
        }
    }

    /// A numbered pre-release such as `beta3`.
    pub const fn numbered(channel: Channel, number: u32) -> Self {
        Self {
            channel,
            number: Some(number),
        }
    }

    /// True for the stable channel.
    pub fn is_stable(&self) -> bool {
        self.channel == Channel::Stable
    }

    /// Whether `candidate` satisfies this tag used as a filter.
    ///
    /// Channels must be equal; numbers must be equal when this filter names
    /// one. `stable` therefore only ever matches `stable`.
    pub fn matches(&self, candidate: &ReleaseTag) -> bool {
        self.channel == candidate.channel
            && self.number.is_none_or(|n| candidate.number == Some(n))
    }
}

impl Default for ReleaseTag {
    fn default() -> Self {
        Self::stable()
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.channel.as_str())?;
        if let Some(n) = self.number {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl FromStr for ReleaseTag {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(s.len());
        let (keyword, digits) = s.split_at(split);
        let channel: Channel = keyword.parse()?;

        if digits.is_empty() {
            return Ok(Self {
                channel,
                number: None,
            });
        }

        if channel == Channel::Stable {
            return Err(SpecError::InvalidSpec(format!(
                "'{s}': stable releases are not numbered"
            )));
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SpecError::InvalidSpec(format!("'{s}' is not a release")));
        }

        let number = digits
            .parse()
            .map_err(|_| SpecError::InvalidSpec(format!("'{s}' has an invalid number")))?;

        Ok(Self {
            channel,
            number: Some(number),
        })
    }
}

/// Parses an upstream release tag such as `4.2.1-stable` or `4.3-beta2`.
///
/// Returns `None` for tags that do not follow the `<version>-<release>`
/// convention; the catalog skips those.
pub fn parse_upstream_tag(tag: &str) -> Option<(Version, ReleaseTag)> {
    let (version, release) = tag.trim_start_matches('v').split_once('-')?;
    if version.split('.').count() < 2 {
        return None;
    }
    let version = version.parse().ok()?;
    let release = release.parse().ok()?;
    Some((version, release))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_tags() {
        assert_eq!("stable".parse::<ReleaseTag>().unwrap(), ReleaseTag::stable());
        assert_eq!(
            "beta3".parse::<ReleaseTag>().unwrap(),
            ReleaseTag::numbered(Channel::Beta, 3)
        );
        assert_eq!(
            "RC1".parse::<ReleaseTag>().unwrap(),
            ReleaseTag::numbered(Channel::Rc, 1)
        );
        assert_eq!(
            "dev".parse::<ReleaseTag>().unwrap(),
            ReleaseTag {
                channel: Channel::Dev,
                number: None
            }
        );
    }

    #[test]
    fn test_reject_invalid_release_tags() {
        for bad in ["", "stable2", "nightly", "beta3a", "3"] {
            assert!(bad.parse::<ReleaseTag>().is_err(), "input {bad:?}");
        }
    }

    #[test]
    fn test_filter_matching() {
        let beta = ReleaseTag {
            channel: Channel::Beta,
            number: None,
        };
        assert!(beta.matches(&ReleaseTag::numbered(Channel::Beta, 1)));
        assert!(beta.matches(&ReleaseTag::numbered(Channel::Beta, 4)));
        assert!(!beta.matches(&ReleaseTag::numbered(Channel::Rc, 1)));

        let beta2 = ReleaseTag::numbered(Channel::Beta, 2);
        assert!(beta2.matches(&ReleaseTag::numbered(Channel::Beta, 2)));
        assert!(!beta2.matches(&ReleaseTag::numbered(Channel::Beta, 3)));

        let stable = ReleaseTag::stable();
        assert!(stable.matches(&ReleaseTag::stable()));
        assert!(!stable.matches(&ReleaseTag::numbered(Channel::Rc, 1)));
    }

    #[test]
    fn test_parse_upstream_tag() {
        assert_eq!(
            parse_upstream_tag("4.2.1-stable"),
            Some((Version::new(4, 2, 1, 0), ReleaseTag::stable()))
        );
        assert_eq!(
            parse_upstream_tag("4.3-beta2"),
            Some((Version::new(4, 3, 0, 0), ReleaseTag::numbered(Channel::Beta, 2)))
        );
        assert_eq!(parse_upstream_tag("latest"), None);
        assert_eq!(parse_upstream_tag("4-stable"), None);
        assert_eq!(parse_upstream_tag("4.2.1"), None);
    }
}
