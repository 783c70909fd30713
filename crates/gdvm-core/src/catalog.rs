//! Upstream release catalog.
//!
//! A [`ReleaseSource`] lists every published release with its assets. The
//! [`CatalogCache`] wraps a source so the listing is fetched at most once per
//! command invocation; it is an ordinary value owned by the caller, never a
//! global, and it is never persisted.

use std::sync::Arc;

use async_trait::async_trait;
use gdvm_schema::{ReleaseTag, Version, parse_upstream_tag};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::paths::filename_from_url;

/// Releases requested per page from the GitHub API (its maximum).
const PER_PAGE: usize = 100;

/// Failure to list upstream releases.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The request could not be sent or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("release listing returned HTTP {status} for {url}")]
    Status {
        /// Status code returned by the API.
        status: StatusCode,
        /// Page URL that was requested.
        url: String,
    },
}

/// One published upstream version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Version parsed from the release tag.
    pub version: Version,
    /// Channel and number parsed from the release tag.
    pub tag: ReleaseTag,
    /// Files attached to the release.
    pub assets: Vec<Asset>,
}

/// One downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Upstream filename, e.g. `Godot_v4.2.1-stable_linux.x86_64.zip`.
    pub name: String,
    /// Direct download URL.
    pub download_url: String,
}

/// A remote source that can list available releases.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Identifier for logs (e.g. the API URL).
    fn key(&self) -> String;

    /// Fetch every release this source knows about.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the listing cannot be retrieved.
    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct GithubRelease {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    assets: Vec<GithubAsset>,
}

#[derive(Debug, Deserialize)]
struct GithubAsset {
    name: String,
    browser_download_url: String,
}

/// Lists releases through the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubSource {
    /// `api_url` is the repository endpoint, e.g.
    /// `https://api.github.com/repos/godotengine/godot-builds`.
    pub fn new(client: Client, api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn fetch_page(&self, page: usize) -> Result<Vec<GithubRelease>, CatalogError> {
        let url = format!("{}/releases?per_page={PER_PAGE}&page={page}", self.api_url);
        tracing::debug!(%url, "fetching release page");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    fn key(&self) -> String {
        self.api_url.clone()
    }

    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        let mut releases = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(page).await?;
            let count = batch.len();

            releases.extend(batch.into_iter().filter_map(convert_release));

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        tracing::debug!(source = %self.key(), count = releases.len(), "release catalog loaded");
        Ok(releases)
    }
}

fn convert_release(release: GithubRelease) -> Option<Release> {
    if release.draft {
        return None;
    }
    let Some((version, tag)) = parse_upstream_tag(&release.tag_name) else {
        tracing::debug!(tag = %release.tag_name, "skipping unrecognized release tag");
        return None;
    };

    let assets = release
        .assets
        .into_iter()
        .map(|a| {
            let name = if a.name.is_empty() {
                filename_from_url(&a.browser_download_url).to_string()
            } else {
                a.name
            };
            Asset {
                name,
                download_url: a.browser_download_url,
            }
        })
        .collect();

    Some(Release {
        version,
        tag,
        assets,
    })
}

/// Process-local, fetch-once view of a [`ReleaseSource`].
pub struct CatalogCache {
    source: Arc<dyn ReleaseSource>,
    releases: OnceCell<Vec<Release>>,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("source", &self.source.key())
            .field("loaded", &self.releases.initialized())
            .finish()
    }
}

impl CatalogCache {
    /// Wrap `source`; nothing is fetched until [`CatalogCache::releases`].
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self {
            source,
            releases: OnceCell::new(),
        }
    }

    /// All releases, fetching them on first use.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; a failed fetch is retried on the next call.
    pub async fn releases(&self) -> Result<&[Release], CatalogError> {
        let releases = self
            .releases
            .get_or_try_init(|| self.source.fetch_releases())
            .await?;
        Ok(releases.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdvm_schema::Channel;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn release_json(tag: &str) -> serde_json::Value {
        json!({
            "tag_name": tag,
            "draft": false,
            "assets": [{
                "name": format!("Godot_v{tag}_linux.x86_64.zip"),
                "browser_download_url": format!("https://example.com/{tag}/Godot_v{tag}_linux.x86_64.zip"),
            }]
        })
    }

    #[tokio::test]
    async fn test_fetch_releases_skips_unknown_tags() {
        let mut server = Server::new_async().await;
        let body = json!([
            release_json("4.2.1-stable"),
            release_json("4.3-beta2"),
            release_json("nightly"),
            { "tag_name": "4.4-dev1", "draft": true, "assets": [] },
        ]);

        let _m = server
            .mock("GET", "/repos/godotengine/godot-builds/releases")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let source = GitHubSource::new(
            Client::new(),
            format!("{}/repos/godotengine/godot-builds/", server.url()),
            None,
        );
        let releases = source.fetch_releases().await.unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].version, Version::new(4, 2, 1, 0));
        assert_eq!(releases[0].tag, ReleaseTag::stable());
        assert_eq!(releases[1].tag, ReleaseTag::numbered(Channel::Beta, 2));
        assert_eq!(
            releases[0].assets[0].name,
            "Godot_v4.2.1-stable_linux.x86_64.zip"
        );
    }

    #[tokio::test]
    async fn test_fetch_releases_follows_pages() {
        let mut server = Server::new_async().await;
        let full: Vec<_> = (0..100)
            .map(|i| release_json(&format!("3.{i}-stable")))
            .collect();

        let _p1 = server
            .mock("GET", "/releases")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(200)
            .with_body(serde_json::Value::Array(full).to_string())
            .create_async()
            .await;
        let _p2 = server
            .mock("GET", "/releases")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(json!([release_json("4.0-stable")]).to_string())
            .create_async()
            .await;

        let source = GitHubSource::new(Client::new(), server.url(), Some("token".into()));
        let releases = source.fetch_releases().await.unwrap();
        assert_eq!(releases.len(), 101);
    }

    #[tokio::test]
    async fn test_fetch_releases_reports_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/releases")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let source = GitHubSource::new(Client::new(), server.url(), None);
        let err = source.fetch_releases().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Status {
                status: StatusCode::FORBIDDEN,
                ..
            }
        ));
    }

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl ReleaseSource for CountingSource {
        fn key(&self) -> String {
            "counting".into()
        }

        async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_cache_fetches_once() {
        let source = Arc::new(CountingSource(AtomicUsize::new(0)));
        let cache = CatalogCache::new(source.clone());

        cache.releases().await.unwrap();
        cache.releases().await.unwrap();
        assert_eq!(source.0.load(Ordering::SeqCst), 1);
    }
}
