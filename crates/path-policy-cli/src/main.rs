mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use path_policy::{Platform, ToolPolicyRegistry};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load config, then merge CLI overrides.
    let loaded = config::load(&cli.config)?;
    let config_found = loaded.is_some();
    let mut cfg = loaded.unwrap_or_default();

    if let Some(ref overrides) = cli.overrides {
        cfg.overrides_file = Some(overrides.clone());
    }
    if let Some(ref platform) = cli.platform {
        cfg.platform = Some(Platform::from_os(platform));
    }
    if let Some(ref usage_log) = cli.usage_log {
        cfg.logging.usage_log_path = usage_log.clone();
    }

    // 3. Diagnostics go to stderr; stdout carries command output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if !config_found {
        warn!(
            path = %cli.config.display(),
            "configuration file not found; using defaults"
        );
    }

    // 4. Build the registry once; everything below only reads it.
    let platform = cfg.platform.clone().unwrap_or_else(Platform::host);
    let overrides = cfg
        .overrides_file
        .as_ref()
        .map(|path| path_policy::loader::load_overrides(path))
        .transpose()
        .context("failed to load tool overrides")?;
    let registry = ToolPolicyRegistry::build(&platform, overrides.as_ref());

    info!(
        config_file = %cli.config.display(),
        %platform,
        ?registry,
        "tool policy ready"
    );

    match cli.command {
        Command::Lookup { tool } => {
            println!("{}", commands::render_lookup(&registry, &tool));
        }
        Command::List { json } => {
            let rows = commands::list_rows(&registry);
            if json {
                print!("{}", commands::render_json_lines(&rows)?);
            } else {
                print!("{}", commands::render_table(&rows));
            }
        }
        Command::Check { tool, args } => {
            let outcome = commands::run_check(
                &registry,
                &platform,
                &tool,
                &args,
                &cfg.logging.usage_log_path,
            )
            .await?;

            if !outcome.permitted() {
                eprintln!("{}", outcome.message());
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", outcome.message());
        }
    }

    Ok(ExitCode::SUCCESS)
}
