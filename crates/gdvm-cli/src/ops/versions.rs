//! Upstream versions available for this platform.

use crate::ops::{Context, OpsError};
use gdvm_core::ArtifactKind;
use gdvm_core::resolver::select_asset;
use gdvm_schema::{ReleaseTag, Semver};

/// Releases shipping an engine build for this platform and mono flavour,
/// newest first. `release` narrows the channel when given.
pub async fn available(
    ctx: &Context,
    release: Option<&ReleaseTag>,
    mono: bool,
) -> Result<Vec<Semver>, OpsError> {
    let releases = ctx.env.releases().await?;

    let mut versions: Vec<Semver> = releases
        .iter()
        .filter(|r| release.is_none_or(|filter| filter.matches(&r.tag)))
        .map(|r| (r, Semver::new(r.version, r.tag.clone(), mono)))
        .filter(|(r, semver)| select_asset(r, semver, ArtifactKind::Engine).is_ok())
        .map(|(_, semver)| semver)
        .collect();
    versions.sort_by(|a, b| b.cmp(a));
    versions.dedup();

    tracing::debug!(count = versions.len(), "available versions");
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing::{Harness, engine_release, release_with};
    use gdvm_core::Release;
    use gdvm_schema::{Channel, Version};

    fn catalog() -> Vec<Release> {
        vec![
            engine_release(Version::new(4, 2, 1, 0)),
            engine_release(Version::new(4, 3, 0, 0)),
            release_with(
                Version::new(4, 4, 0, 0),
                ReleaseTag::numbered(Channel::Beta, 1),
            ),
            Release {
                version: Version::new(4, 1, 0, 0),
                tag: ReleaseTag::stable(),
                assets: Vec::new(),
            },
        ]
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let h = Harness::new(catalog());

        let versions = available(&h.ctx, None, false).await.unwrap();
        let names: Vec<String> = versions.iter().map(Semver::local_name).collect();

        assert_eq!(
            names,
            vec!["4.4.0.0-beta1", "4.3.0.0-stable", "4.2.1.0-stable"]
        );
    }

    #[tokio::test]
    async fn test_channel_filter() {
        let h = Harness::new(catalog());
        let beta: ReleaseTag = "beta".parse().unwrap();

        let versions = available(&h.ctx, Some(&beta), true).await.unwrap();

        assert_eq!(versions.len(), 1);
        assert!(versions[0].mono);
        assert_eq!(versions[0].release, ReleaseTag::numbered(Channel::Beta, 1));
    }
}
