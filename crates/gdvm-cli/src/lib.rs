//! gdvm - Godot engine version manager
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Installs several Godot engine versions side by side and keeps one of
//! them reachable as `godot` on the `PATH`.
//!
//! # Architecture
//!
//! - [`cmd`]: one function per subcommand; parses input and prints results.
//! - [`ops`]: the lifecycle (download, install, uninstall, list, use) over a
//!   [`ops::Context`] of injected collaborators.
//! - [`ui`]: terminal output.

pub mod cmd;
pub mod ops;
pub mod ui;

pub use gdvm_core::USER_AGENT;

use clap::{Args, Parser, Subcommand};
use gdvm_core::ConfigOverrides;
use gdvm_schema::{ReleaseTag, SpecError, VersionSpec};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gdvm")]
#[command(author, version, about = "gdvm - Godot engine version manager")]
pub struct Cli {
    /// Trace requests, cache paths and extraction
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress bars and missing-version notices
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Root directory for caches, installs and the active link
    #[arg(long, global = true, env = "GDVM_HOME")]
    pub home: Option<PathBuf>,

    /// Releases API base URL
    #[arg(long, global = true, env = "GDVM_API_URL")]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = "GDVM_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Token for authenticated release API requests
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings given on the command line or through the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            home: self.home.clone(),
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            github_token: self.github_token.clone(),
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage Godot engine versions
    Godot {
        #[command(subcommand)]
        command: GodotCommands,
    },
    /// Manage export templates
    Templates {
        #[command(subcommand)]
        command: TemplatesCommands,
    },
    /// Query upstream versions
    Versions {
        #[command(subcommand)]
        command: VersionsCommands,
    },
    /// Manage downloaded archives
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Version arguments of the subcommand, if it takes any.
    pub fn version_args(&self) -> Option<&VersionArgs> {
        match self {
            Self::Godot {
                command:
                    GodotCommands::Download(args)
                    | GodotCommands::Install(args)
                    | GodotCommands::Uninstall(args)
                    | GodotCommands::Use(args),
            }
            | Self::Templates {
                command:
                    TemplatesCommands::Download(args)
                    | TemplatesCommands::Install(args)
                    | TemplatesCommands::Uninstall(args),
            } => Some(args),
            _ => None,
        }
    }

    /// Check version and release arguments without touching the
    /// configuration or the network.
    pub fn validate(&self) -> Result<(), SpecError> {
        if let Some(args) = self.version_args() {
            args.spec()?;
        }
        if let Self::Versions {
            command:
                VersionsCommands::List {
                    release: Some(release),
                    ..
                },
        } = self
        {
            release.parse::<ReleaseTag>()?;
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum GodotCommands {
    /// Download an engine archive into the cache
    Download(VersionArgs),
    /// Download and extract an engine version
    Install(VersionArgs),
    /// Remove an installed engine version
    Uninstall(VersionArgs),
    /// List installed engine versions
    List,
    /// Make an installed version the active `godot`
    Use(VersionArgs),
    /// Show the active executable
    Which,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommands {
    /// Download an export templates archive into the cache
    Download(VersionArgs),
    /// Download and extract export templates
    Install(VersionArgs),
    /// Remove installed export templates
    Uninstall(VersionArgs),
    /// List installed export templates
    List,
}

#[derive(Debug, Subcommand)]
pub enum VersionsCommands {
    /// List versions available for this platform
    List {
        /// Only this release channel (stable, rc, beta2, ...)
        #[arg(short, long)]
        release: Option<String>,
        /// Mono (C#) builds
        #[arg(short, long)]
        mono: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheCommands {
    /// Delete every cached archive
    Clean,
}

/// A possibly partial version request.
#[derive(Debug, Clone, Args)]
pub struct VersionArgs {
    /// Version: x.x.x.x | x.x.x | x.x
    pub version: String,

    /// Release channel, optionally numbered: stable, rc1, beta3, dev2
    #[arg(short, long, default_value = "stable")]
    pub release: String,

    /// Mono (C#) build
    #[arg(short, long)]
    pub mono: bool,
}

impl VersionArgs {
    /// Parse into a [`VersionSpec`].
    pub fn spec(&self) -> Result<VersionSpec, SpecError> {
        VersionSpec::build(&self.version, &self.release, self.mono)
    }
}
