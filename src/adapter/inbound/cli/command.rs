//! Command-line interface definitions.
//!
//! Defines the CLI structure for the clientdb service using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default configuration path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Dual-store client record service
#[derive(Parser, Debug)]
#[command(name = "clientdb")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until interrupted
    Serve(ServeArgs),

    /// Create the relational table and the document unique index, then exit
    Init(ConfigPathArg),

    /// Validate configuration and ping both stores
    Check(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Arguments for `clientdb serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Listen address, overriding `server.bind`.
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_defaults_to_config_toml() {
        let cli = Cli::parse_from(["clientdb", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.bind.is_none());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["clientdb", "check", "--config", "alt.toml", "--json"]);
        assert!(cli.json);
        let Commands::Check(args) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.config, PathBuf::from("alt.toml"));
    }
}
