//! Command line interface
//!
//! - `serve`: HTTP API over the workflow service
//! - `workflows`: list the catalog
//! - `run`: run one workflow to completion in the terminal
//! - `keywords`, `fetch`, `render`: the individual building blocks

pub mod run;
pub mod serve;
pub mod tools;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Creator Workflow - guided content planning with prompt-template workflows
#[derive(Parser)]
#[command(name = "creator-workflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// List available workflows
    Workflows(tools::WorkflowsArgs),

    /// Run every step of a workflow and export the results
    Run(run::RunArgs),

    /// Look up keyword metrics for a seed phrase
    Keywords(tools::KeywordsArgs),

    /// Fetch a page and print the text used for prompts
    Fetch(tools::FetchArgs),

    /// Fill a prompt template with values
    Render(tools::RenderArgs),
}

/// Load configuration and install logging
pub fn init() -> anyhow::Result<AppConfig> {
    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;
    Ok(config)
}

/// Parse a `key=value` argument
pub fn parse_key_val(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", arg));
    }

    Ok((key.to_string(), value.to_string()))
}
