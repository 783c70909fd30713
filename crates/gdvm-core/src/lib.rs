//! Core library for gdvm.
//!
//! Turns a [`VersionSpec`](gdvm_schema::VersionSpec) into one concrete
//! upstream asset and provides the side-effecting building blocks the CLI
//! composes into download, install, uninstall and activation.
//!
//! # Directory Layout
//!
//! ```text
//! $GDVM_HOME/
//! ├── bin/          # `godot` link to the active executable
//! ├── cache/
//! │   ├── godot/      # engine archives, by upstream filename
//! │   └── templates/  # export template archives
//! ├── godot/        # extracted engines, by local name
//! ├── templates/    # extracted export templates, by local name
//! └── config.toml   # optional settings
//! ```

pub mod artifact;
pub mod catalog;
pub mod config;
pub mod environment;
pub mod io;
pub mod link;
pub mod locate;
pub mod paths;
pub mod platform;
pub mod reporter;
pub mod resolver;

pub use artifact::ArtifactKind;
pub use catalog::{Asset, CatalogCache, CatalogError, GitHubSource, Release, ReleaseSource};
pub use config::{Config, ConfigError, ConfigOverrides};
pub use environment::Environment;
pub use link::LinkError;
pub use locate::{ExecutableLocator, LocateError, PlatformLocator};
pub use reporter::{NullReporter, Reporter};
pub use resolver::ResolveError;

/// User Agent string for catalog and download requests.
pub const USER_AGENT: &str = concat!("gdvm/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the catalog and the transport.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
}
