//! Shared operation context.
//!
//! Groups the configuration and the collaborators every lifecycle
//! operation needs, so they can be swapped out in tests.

use crate::ops::OpsError;
use gdvm_core::io::{Archiver, HttpTransport, Transport, ZipArchiver};
use gdvm_core::{
    Config, Environment, ExecutableLocator, GitHubSource, PlatformLocator, Reporter,
};
use std::fmt;
use std::sync::Arc;

/// Everything one command invocation works with.
#[derive(Clone)]
pub struct Context {
    /// Settings for this invocation.
    pub config: Config,
    /// Catalog-backed resolver.
    pub env: Arc<Environment>,
    /// Fetches archives into the cache.
    pub transport: Arc<dyn Transport>,
    /// Unpacks cached archives.
    pub archiver: Arc<dyn Archiver>,
    /// Finds the engine executable in an install.
    pub locator: Arc<dyn ExecutableLocator>,
    /// User-facing output.
    pub reporter: Arc<dyn Reporter>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("home", &self.config.home)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Wire up the HTTP catalog, transport, zip archiver and the locator
    /// for this platform.
    pub fn new(config: Config, reporter: Arc<dyn Reporter>) -> Result<Self, OpsError> {
        let client = gdvm_core::http_client(&config)?;
        let source = GitHubSource::new(
            client.clone(),
            config.api_url.clone(),
            config.github_token.clone(),
        );
        tracing::debug!(api = %config.api_url, home = %config.home.display(), "context ready");

        Ok(Self {
            config,
            env: Arc::new(Environment::new(Arc::new(source))),
            transport: Arc::new(HttpTransport::new(client)),
            archiver: Arc::new(ZipArchiver),
            locator: Arc::new(PlatformLocator),
            reporter,
        })
    }
}
