//! CLI command definitions
//!
//! All CLI structs and subcommand enums are defined here.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// beadbridge - local issues with bridges to external trackers
#[derive(Parser, Debug)]
#[command(name = "bb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Path to config file (default: ~/.config/beadbridge/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new issue
    Add {
        /// Provide a title to describe the issue
        #[arg(short, long, default_value = "")]
        title: String,

        /// Provide a message to describe the issue
        #[arg(short, long, default_value = "")]
        message: String,

        /// Take the message from the given file. Use - to read the message from the standard input
        #[arg(short = 'F', long)]
        file: Option<String>,
    },

    /// Configure and use bridges to other issue trackers
    #[command(subcommand)]
    Bridge(BridgeCommands),
}

#[derive(Subcommand, Debug)]
pub enum BridgeCommands {
    /// Configure a new bridge (interactive)
    Configure {
        /// Bridge type (e.g. github)
        bridge_type: String,

        /// Name of this bridge instance
        name: String,
    },

    /// Import issues from a configured bridge
    Pull {
        /// Bridge type (e.g. github)
        bridge_type: String,

        /// Name of this bridge instance
        name: String,

        /// Import only this remote item
        id: Option<String>,
    },

    /// Export issues through a configured bridge
    Push {
        /// Bridge type (e.g. github)
        bridge_type: String,

        /// Name of this bridge instance
        name: String,

        /// Export only this local issue
        id: Option<String>,
    },

    /// Delete the stored configuration of a bridge
    Rm {
        /// Bridge type (e.g. github)
        bridge_type: String,

        /// Name of this bridge instance
        name: String,
    },

    /// List available bridge types
    Types,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_flags() {
        let cli = Cli::try_parse_from(["bb", "add", "-t", "Bug", "-m", "desc"]).unwrap();
        match cli.command {
            Commands::Add { title, message, file } => {
                assert_eq!(title, "Bug");
                assert_eq!(message, "desc");
                assert!(file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.repo, PathBuf::from("."));
    }

    #[test]
    fn test_parse_bridge_pull() {
        let cli =
            Cli::try_parse_from(["bb", "-C", "/work/repo", "bridge", "pull", "github", "origin", "42"])
                .unwrap();
        assert_eq!(cli.repo, PathBuf::from("/work/repo"));
        match cli.command {
            Commands::Bridge(BridgeCommands::Pull {
                bridge_type,
                name,
                id,
            }) => {
                assert_eq!(bridge_type, "github");
                assert_eq!(name, "origin");
                assert_eq!(id.as_deref(), Some("42"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
