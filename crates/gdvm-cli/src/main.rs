//! gdvm - Godot engine version manager CLI

use anyhow::{Context as _, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use gdvm_cli::cmd;
use gdvm_cli::ops::Context;
use gdvm_cli::ui::Output;
use gdvm_cli::{CacheCommands, Cli, Commands, GodotCommands, TemplatesCommands, VersionsCommands};
use gdvm_core::{ArtifactKind, Config, Reporter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let reporter: Arc<dyn Reporter> = Arc::new(Output::new(cli.quiet));

    match run(cli, Arc::clone(&reporter)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// --verbose traces gdvm's own crates; RUST_LOG still wins when set.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gdvm=debug,gdvm_cli=debug,gdvm_core=debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, reporter: Arc<dyn Reporter>) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        cmd::completions::completions(shell);
        return Ok(());
    }

    // A bad version argument is reported before config or network are touched.
    cli.command.validate()?;

    let config = Config::load(cli.overrides()).context("Failed to load configuration")?;
    init_tracing(config.verbose);

    let quiet = cli.quiet;
    let ctx = Context::new(config, reporter)?;

    match cli.command {
        Commands::Godot { command } => {
            let kind = ArtifactKind::Engine;
            match command {
                GodotCommands::Download(args) => cmd::download::download(&ctx, kind, &args).await,
                GodotCommands::Install(args) => cmd::install::install(&ctx, kind, &args).await,
                GodotCommands::Uninstall(args) => {
                    cmd::uninstall::uninstall(&ctx, kind, &args, quiet).await
                }
                GodotCommands::List => cmd::list::list(&ctx, kind),
                GodotCommands::Use(args) => cmd::r#use::use_version(&ctx, &args).await,
                GodotCommands::Which => cmd::which::which(&ctx),
            }
        }
        Commands::Templates { command } => {
            let kind = ArtifactKind::Templates;
            match command {
                TemplatesCommands::Download(args) => {
                    cmd::download::download(&ctx, kind, &args).await
                }
                TemplatesCommands::Install(args) => cmd::install::install(&ctx, kind, &args).await,
                TemplatesCommands::Uninstall(args) => {
                    cmd::uninstall::uninstall(&ctx, kind, &args, quiet).await
                }
                TemplatesCommands::List => cmd::list::list(&ctx, kind),
            }
        }
        Commands::Versions {
            command: VersionsCommands::List { release, mono },
        } => cmd::versions::list(&ctx, release.as_deref(), mono).await,
        Commands::Cache {
            command: CacheCommands::Clean,
        } => cmd::clean::clean(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
