//! confighandler: read values from a self-bootstrapping INI config file
//!
//! A thin CLI over the library so shell scripts can fail fast on missing keys.

mod cli;
mod service;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use confighandler::domain::logger;
use confighandler::ConfigHandler;
use service::QueryService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let folder = cli.folder.clone().unwrap_or_else(service::default_folder);

    if cli.debug {
        logger::init(&folder.join("logs"))?;
    }

    // Load (creating the file when absent)
    let handler = ConfigHandler::new(&folder, &cli.name)
        .with_context(|| format!("Failed to open config '{}' in {}", cli.name, folder.display()))?;

    let service = QueryService::new(handler);
    let output = service.execute(&cli.command)?;

    if !output.is_empty() || !cli.quiet {
        println!("{}", output);
    }

    Ok(())
}
