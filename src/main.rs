//! beadbridge - local issues with bridges to external trackers
//!
//! Main entry point for the `bb` CLI.

mod commands;

use beadbridge::actions::{self, AddOptions};
use beadbridge::bridge::{registry, Bridge};
use beadbridge::cache::RepoCache;
use beadbridge::config::AppConfig;
use beadbridge::input::ExternalEditor;
use beadbridge::repository::GitRepo;
use clap::Parser;
use commands::{BridgeCommands, Cli, Commands};
use std::io;
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = beadbridge::logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    registry::init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> beadbridge::Result<()> {
    let config = match cli.config {
        Some(ref path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default()?,
    };
    let repo_path = cli.repo;

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Add {
            title,
            message,
            file,
        } => {
            let mut cache = open_cache(&repo_path)?;
            let editor = ExternalEditor::new(config.editor.clone());
            let options = AddOptions {
                title,
                message,
                message_file: file,
            };
            actions::run_add(&mut cache, options, &editor, &mut stdout)
        }

        Commands::Bridge(BridgeCommands::Configure { bridge_type, name }) => {
            let repo = GitRepo::discover(&repo_path)?;
            let mut bridge = load_bridge(&config, &bridge_type, &name)?;
            actions::run_bridge_configure(&repo, &mut bridge, &mut stdout)
        }

        Commands::Bridge(BridgeCommands::Pull {
            bridge_type,
            name,
            id,
        }) => {
            let mut cache = open_cache(&repo_path)?;
            let mut bridge = load_bridge(&config, &bridge_type, &name)?;
            actions::run_bridge_pull(&mut cache, &mut bridge, id.as_deref(), &mut stdout)
        }

        Commands::Bridge(BridgeCommands::Push {
            bridge_type,
            name,
            id,
        }) => {
            let mut cache = open_cache(&repo_path)?;
            let mut bridge = load_bridge(&config, &bridge_type, &name)?;
            actions::run_bridge_push(&mut cache, &mut bridge, id.as_deref(), &mut stdout)
        }

        Commands::Bridge(BridgeCommands::Rm { bridge_type, name }) => {
            let repo = GitRepo::discover(&repo_path)?;
            let mut bridge = load_bridge(&config, &bridge_type, &name)?;
            actions::run_bridge_rm(&repo, &mut bridge, &mut stdout)
        }

        Commands::Bridge(BridgeCommands::Types) => {
            actions::run_bridge_types(&registry::bridge_types(), &mut stdout)
        }
    }
}

fn open_cache(path: &Path) -> beadbridge::Result<RepoCache> {
    let repo = GitRepo::discover(path)?;
    RepoCache::open(Box::new(repo))
}

fn load_bridge(config: &AppConfig, bridge_type: &str, name: &str) -> beadbridge::Result<Bridge> {
    let bridge = registry::load_bridge(bridge_type, name)?;
    tracing::debug!(namespace_root = %config.namespace_root, "Using bridge namespace root");
    Ok(bridge.with_namespace_root(&config.namespace_root))
}
