//! Command line interface definition

use clap::{Parser, Subcommand};
use retrial_types::ColorChoice;
use std::path::PathBuf;

/// retrial - verify dependency artifacts against approved checksums
#[derive(Parser)]
#[command(name = "retrial")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify dependency artifacts against approved SHA-512 checksums")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Checksum database to read and write
    #[arg(long, global = true, value_name = "PATH")]
    pub checksum_file: Option<PathBuf>,

    /// Read live dependencies from this manifest
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "repository")]
    pub manifest: Option<PathBuf>,

    /// Scan live dependencies from this Maven-layout directory
    #[arg(long, global = true, value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Files hashed concurrently (0 = number of CPUs)
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check live dependencies against the recorded checksums
    Verify,

    /// Approve the current dependencies by recording their checksums
    #[command(alias = "approve")]
    Record,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "retrial",
            "verify",
            "--json",
            "--jobs",
            "3",
            "--repository",
            "libs",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Verify));
        assert!(cli.global.json);
        assert_eq!(cli.global.jobs, Some(3));
        assert_eq!(cli.global.repository, Some(PathBuf::from("libs")));
    }

    #[test]
    fn test_manifest_conflicts_with_repository() {
        let result = Cli::try_parse_from([
            "retrial",
            "--manifest",
            "deps.toml",
            "--repository",
            "libs",
            "verify",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_approve_alias() {
        let cli = Cli::try_parse_from(["retrial", "approve"]).unwrap();
        assert!(matches!(cli.command, Commands::Record));
    }
}
