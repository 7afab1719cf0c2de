//! CLI argument definitions.

use crate::cli::validators::{parse_port, parse_slug};
use crate::constants::DEFAULT_DESTINATION;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Clean an exported Studio customization into a redistributable industry
/// module.
#[derive(Debug, Parser)]
#[command(name = "modsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for the cleanup run.
    #[command(flatten)]
    pub clean: CleanArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the cleanup run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct CleanArgs {
    /// Target module slug (lowercase letters, digits, '_' or '-').
    #[arg(long, value_parser = parse_slug, env = "MODSWEEP_MODULE_NAME")]
    pub module_name: Option<String>,

    /// Module category slug.
    #[arg(long, value_parser = parse_slug, env = "MODSWEEP_CATEGORY")]
    pub category: Option<String>,

    /// Path to the exported studio_customization module directory.
    #[arg(long, env = "MODSWEEP_STUDIO_PATH")]
    pub studio_path: Option<PathBuf>,

    /// Name of the restored database on the server.
    #[arg(long, env = "MODSWEEP_DB_NAME")]
    pub db_name: Option<String>,

    /// HTTP port of the running server.
    #[arg(long, value_parser = parse_port, env = "MODSWEEP_PORT")]
    pub port: Option<u16>,

    /// Base directory for the cleaned module.
    #[arg(long, default_value = DEFAULT_DESTINATION, env = "MODSWEEP_DESTINATION")]
    pub destination: PathBuf,

    /// Server base URL (overrides config).
    #[arg(long, env = "MODSWEEP_URL")]
    pub url: Option<String>,

    /// Admin login (overrides config).
    #[arg(long, env = "MODSWEEP_LOGIN")]
    pub login: Option<String>,

    /// Admin password (overrides config).
    #[arg(long, env = "MODSWEEP_PASSWORD")]
    pub password: Option<String>,

    /// Skip every server call (computed-field removal and the demo
    /// payment provider check are skipped).
    #[arg(long)]
    pub offline: bool,

    /// Do not reset the admin credentials via psql.
    #[arg(long)]
    pub skip_db_reset: bool,

    /// Overwrite an existing destination module directory.
    #[arg(long)]
    pub force: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_clean_run() {
        let cli = Cli::try_parse_from([
            "modsweep",
            "--module-name=pet_shop",
            "--category=retail",
            "--studio-path=/tmp/studio_customization",
            "--db-name=pet_shop_db",
            "--port=8069",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.clean.module_name.as_deref(), Some("pet_shop"));
        assert_eq!(cli.clean.port, Some(8069));
        assert_eq!(cli.clean.destination, PathBuf::from("/home/odoo/Downloads"));
    }

    #[test]
    fn test_cli_rejects_bad_slug() {
        let cli = Cli::try_parse_from(["modsweep", "--module-name=Pet Shop"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_rejects_port_zero() {
        let cli = Cli::try_parse_from(["modsweep", "--port=0"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["modsweep", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "modsweep",
            "--offline",
            "--skip-db-reset",
            "--force",
            "-vv",
        ])
        .unwrap();
        assert!(cli.clean.offline);
        assert!(cli.clean.skip_db_reset);
        assert!(cli.clean.force);
        assert_eq!(cli.clean.verbose, 2);
    }
}
