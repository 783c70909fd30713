//! Catalog-backed resolution shared by every command.

use std::sync::Arc;

use gdvm_schema::{Semver, VersionSpec};

use crate::artifact::ArtifactKind;
use crate::catalog::{Asset, CatalogCache, Release, ReleaseSource};
use crate::resolver::{self, ResolveError};

/// Resolution entry point: a catalog cache plus the resolver.
///
/// Construct one per command invocation. Repeated calls share the cached
/// catalog and never touch the filesystem.
#[derive(Debug)]
pub struct Environment {
    catalog: CatalogCache,
}

impl Environment {
    /// Resolve against `source`, fetched lazily at most once.
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            catalog: CatalogCache::new(source),
        }
    }

    /// Resolves `spec` to one bound version and the asset to download.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when no release or asset matches,
    /// [`ResolveError::InvalidSpec`] for an unusable spec, or a catalog error.
    pub async fn fetch_asset(
        &self,
        spec: &VersionSpec,
        kind: ArtifactKind,
    ) -> Result<(Semver, Asset), ResolveError> {
        let releases = self.catalog.releases().await?;
        let (semver, asset) = resolver::resolve(releases, spec, kind)?;
        tracing::debug!(%spec, %semver, asset = %asset.name, "resolved");
        Ok((semver, asset.clone()))
    }

    /// Resolves `spec` to a bound version without choosing an asset.
    ///
    /// Enough to address an install directory, which is keyed by version
    /// alone.
    ///
    /// # Errors
    ///
    /// As [`Environment::fetch_asset`], minus the missing-asset case.
    pub async fn resolve_version(&self, spec: &VersionSpec) -> Result<Semver, ResolveError> {
        let releases = self.catalog.releases().await?;
        let release = resolver::resolve_release(releases, spec)?;
        Ok(Semver::new(release.version, release.tag.clone(), spec.mono()))
    }

    /// Every release in the catalog.
    ///
    /// # Errors
    ///
    /// Propagates catalog errors.
    pub async fn releases(&self) -> Result<&[Release], ResolveError> {
        Ok(self.catalog.releases().await?)
    }
}
