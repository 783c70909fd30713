//! Selects exactly one release and asset for a [`VersionSpec`].
//!
//! Resolution narrows the catalog in fixed steps:
//!
//! 1. keep releases whose tag matches the requested release filter
//! 2. drop releases whose version disagrees with any requested component
//! 3. for every unspecified component, most significant first, keep only
//!    the releases carrying its highest value; then the highest channel
//!    number when the filter named none
//! 4. pick the asset for the current platform and mono flavour
//!
//! An unspecified major is rejected up front: it would match the whole
//! catalog.

use gdvm_schema::{Semver, VersionSpec};
use thiserror::Error;

use crate::artifact::ArtifactKind;
use crate::catalog::{Asset, CatalogError, Release};
use crate::platform::CURRENT;

/// Failure to bind a spec to an upstream asset.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The version spec cannot be resolved at all, e.g. it has no major version.
    #[error("invalid version spec: {0}")]
    InvalidSpec(String),

    /// No release or asset satisfies the version spec.
    #[error("{0} not found")]
    NotFound(String),

    /// The catalog could not be listed.
    #[error("failed to load release catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl ResolveError {
    /// True when nothing matched; a recoverable outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Picks the single release satisfying `spec`.
///
/// # Errors
///
/// [`ResolveError::InvalidSpec`] when the major component is missing,
/// [`ResolveError::NotFound`] when no release survives filtering.
pub fn resolve_release<'a>(
    releases: &'a [Release],
    spec: &VersionSpec,
) -> Result<&'a Release, ResolveError> {
    if spec.component(0).is_none() {
        return Err(ResolveError::InvalidSpec(
            "a major version is required".to_string(),
        ));
    }

    let mut candidates: Vec<&Release> = releases
        .iter()
        .filter(|r| spec.release().matches(&r.tag))
        .filter(|r| {
            spec.components()
                .iter()
                .enumerate()
                .all(|(i, wanted)| wanted.is_none_or(|w| r.version.component(i) == w))
        })
        .collect();

    for (i, wanted) in spec.components().iter().enumerate() {
        if wanted.is_none() {
            retain_max(&mut candidates, |r| r.version.component(i));
        }
    }
    if spec.release().number.is_none() {
        retain_max(&mut candidates, |r| r.tag.number);
    }

    if candidates.len() > 1 {
        tracing::warn!(
            count = candidates.len(),
            %spec,
            "upstream lists duplicate releases; using the first"
        );
    }

    candidates
        .first()
        .copied()
        .ok_or_else(|| ResolveError::NotFound(format!("release {spec}")))
}

/// Picks the asset of `release` for the current platform, mono flavour and
/// artifact kind.
///
/// # Errors
///
/// [`ResolveError::NotFound`] when the release ships no such asset.
pub fn select_asset<'a>(
    release: &'a Release,
    semver: &Semver,
    kind: ArtifactKind,
) -> Result<&'a Asset, ResolveError> {
    let wanted = kind.asset_names(semver);
    wanted
        .iter()
        .find_map(|name| release.assets.iter().find(|a| a.name == *name))
        .ok_or_else(|| {
            tracing::debug!(?wanted, platform = CURRENT.name, "no matching asset in release");
            let label = kind.label();
            ResolveError::NotFound(match kind {
                ArtifactKind::Engine => format!("{label} asset for {semver} on {}", CURRENT.name),
                ArtifactKind::Templates => format!("{label} asset for {semver}"),
            })
        })
}

/// Resolves `spec` against `releases` into a bound version and its asset.
///
/// # Errors
///
/// See [`resolve_release`] and [`select_asset`].
pub fn resolve<'a>(
    releases: &'a [Release],
    spec: &VersionSpec,
    kind: ArtifactKind,
) -> Result<(Semver, &'a Asset), ResolveError> {
    let release = resolve_release(releases, spec)?;
    let semver = Semver::new(release.version, release.tag.clone(), spec.mono());
    let asset = select_asset(release, &semver, kind)?;
    Ok((semver, asset))
}

fn retain_max<T: Ord + Copy>(candidates: &mut Vec<&Release>, key: impl Fn(&Release) -> T) {
    if let Some(max) = candidates.iter().map(|r| key(r)).max() {
        candidates.retain(|r| key(r) == max);
    }
}
