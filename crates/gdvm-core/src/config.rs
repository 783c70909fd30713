//! Per-invocation configuration.
//!
//! Values are layered: explicit overrides (CLI flags or their environment
//! variables) win over `config.toml` in the gdvm home, which wins over the
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::artifact::ArtifactKind;
use crate::link;
use crate::paths::try_gdvm_home;

/// Upstream repository publishing engine and template builds.
pub const DEFAULT_API_URL: &str = "https://api.github.com/repos/godotengine/godot-builds";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Name of the optional settings file inside the gdvm home.
pub const CONFIG_FILE: &str = "config.toml";

/// Failure to assemble a [`Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither `GDVM_HOME` nor the user's home directory is available.
    #[error("could not determine a home directory; set GDVM_HOME")]
    NoHome,

    /// `config.toml` exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// `config.toml` is not valid TOML or has unknown keys.
    #[error("invalid {path}: {source}")]
    Parse {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Values supplied on the command line or through environment variables.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--home` / `GDVM_HOME`.
    pub home: Option<PathBuf>,
    /// `--api-url` / `GDVM_API_URL`.
    pub api_url: Option<String>,
    /// `--timeout` / `GDVM_TIMEOUT_SECS`.
    pub timeout_secs: Option<u64>,
    /// `GITHUB_TOKEN`.
    pub github_token: Option<String>,
    /// `--verbose`; there is no file setting for it.
    pub verbose: bool,
}

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Releases API base URL, e.g. a mirror.
    pub api_url: Option<String>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Bearer token for the releases API.
    pub github_token: Option<String>,
}

impl FileConfig {
    /// Reads `path`, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved settings for one command invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of every directory gdvm manages.
    pub home: PathBuf,
    /// Base URL of the releases API (`.../repos/<owner>/<repo>`).
    pub api_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Optional bearer token for the releases API.
    pub github_token: Option<String>,
    /// Emit request and path tracing.
    pub verbose: bool,
}

impl Config {
    /// Layer overrides, `config.toml` and defaults into a `Config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHome`] when no home directory can be found,
    /// or a read/parse error for a malformed `config.toml`.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let home = overrides
            .home
            .or_else(try_gdvm_home)
            .ok_or(ConfigError::NoHome)?;
        let file = FileConfig::load(&home.join(CONFIG_FILE))?;

        Ok(Self {
            home,
            api_url: overrides
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                overrides
                    .timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            github_token: overrides.github_token.or(file.github_token),
            verbose: overrides.verbose,
        })
    }

    /// Defaults rooted at `home`, ignoring the environment and config file.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            github_token: None,
            verbose: false,
        }
    }

    /// Downloaded archives of `kind`: `<home>/cache/<folder>`.
    pub fn cache_dir(&self, kind: ArtifactKind) -> PathBuf {
        self.home.join("cache").join(kind.folder())
    }

    /// Extracted installs of `kind`: `<home>/<folder>`.
    pub fn install_root(&self, kind: ArtifactKind) -> PathBuf {
        self.home.join(kind.folder())
    }

    /// Directory holding the active-version link: `<home>/bin`.
    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }

    /// Fixed path of the link to the active engine executable.
    pub fn link_path(&self) -> PathBuf {
        self.bin_dir().join(link::LINK_FILENAME)
    }
}
