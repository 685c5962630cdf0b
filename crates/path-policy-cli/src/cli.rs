use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "path-policy", version, about = "Inspect and enforce the build's host tool policy")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "path-policy.yaml")]
    pub config: PathBuf,

    /// Path to a tool override file (overrides config file setting)
    #[arg(short, long)]
    pub overrides: Option<PathBuf>,

    /// Platform to evaluate for, e.g. linux or darwin (defaults to the host)
    #[arg(long)]
    pub platform: Option<String>,

    /// Usage log path (overrides config file setting)
    #[arg(long)]
    pub usage_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the policy for one tool
    Lookup {
        tool: String,
    },
    /// List every tool with an explicit policy
    List {
        /// Emit JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Decide an invocation, recording it when the policy asks for a log
    Check {
        tool: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
