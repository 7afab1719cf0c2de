//! modsweep - Studio customization export cleanup tool.
//!
//! Turns the module exported by the Studio visual customization tool into
//! a clean, redistributable industry add-on: identifiers renamed, Studio
//! artifacts stripped, computed and volatile fields removed, circular
//! data-loading dependencies broken, and the manifest rewritten.

#![warn(missing_docs)]

pub mod circular;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod postprocess;
pub mod rpc;
pub mod rules;
pub mod scaffold;
pub mod xml;

use clap::Parser;
use cli::{CleanArgs, Cli, Command, ConfigAction};
use config::{Config, config_file_path, load_default_config, save_config};
use manifest::RewriteOptions;
use pipeline::{CleanOptions, clean_module};
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for the modsweep CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.clean.verbose, cli.clean.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    let opts = build_options(&cli.clean, &config)?;
    let summary = clean_module(&opts)?;

    info!("clean up successful");
    println!("{}", summary.destination.display());
    Ok(())
}

/// Merge CLI arguments and configuration into run options.
fn build_options(args: &CleanArgs, config: &Config) -> Result<CleanOptions> {
    let module_name = required(args.module_name.as_deref(), "--module-name")?;
    let category = required(args.category.as_deref(), "--category")?;
    let studio_path = args.studio_path.clone().ok_or_else(|| Error::Validation {
        message: "--studio-path is required".to_string(),
    })?;
    let db_name = required(args.db_name.as_deref(), "--db-name")?;
    let port = args.port.ok_or_else(|| Error::Validation {
        message: "--port is required".to_string(),
    })?;

    let mut rewrite = RewriteOptions::new(&module_name, &category);
    rewrite.unwanted_depends = config.unwanted_depends();
    rewrite.required_depends = config.rules.required_depends.clone();
    rewrite.author = config.manifest.author.clone();
    rewrite.license = config.manifest.license.clone();
    rewrite.version = config.manifest.version.clone();

    Ok(CleanOptions {
        module_name,
        studio_path,
        destination: args.destination.clone(),
        db_name,
        port,
        base_url: args
            .url
            .clone()
            .unwrap_or_else(|| config.server.base_url.clone()),
        login: args
            .login
            .clone()
            .unwrap_or_else(|| config.server.login.clone()),
        password: args
            .password
            .clone()
            .unwrap_or_else(|| config.server.password.clone()),
        offline: args.offline,
        skip_db_reset: args.skip_db_reset,
        force: args.force,
        progress_enabled: !args.quiet && !args.no_progress,
        unwanted_fields: config.unwanted_fields(),
        rewrite,
    })
}

fn required(value: Option<&str>, flag: &str) -> Result<String> {
    value.map(str::to_string).ok_or_else(|| Error::Validation {
        message: format!("{flag} is required"),
    })
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config),
    }
}

fn handle_config_command(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
