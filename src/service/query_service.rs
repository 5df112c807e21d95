//! Query service executing CLI commands against a loaded config.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use confighandler::{ConfigHandler, GetOptions, OnMissing};

use crate::cli::Commands;

/// Folder used when `--folder` is not given.
/// Always ~/.config/confighandler for cross-platform consistency.
pub fn default_folder() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("confighandler")
}

/// JSON shape printed by `dump`.
#[derive(Debug, Serialize)]
struct Dump {
    path: String,
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

/// Runs one command and renders its output.
pub struct QueryService {
    handler: ConfigHandler,
}

impl QueryService {
    /// Create a service over an already loaded handler.
    pub fn new(handler: ConfigHandler) -> Self {
        Self { handler }
    }

    /// Execute `command` and return the text to print.
    ///
    /// Missing keys follow the handler's policy, so without `--no-exit`
    /// this may end the process with status 1.
    pub fn execute(&self, command: &Commands) -> Result<String> {
        debug!("Executing {:?}", command);

        let output = match command {
            Commands::Get {
                section,
                option,
                raw,
                no_exit,
            } => {
                let opts = GetOptions {
                    raw: *raw,
                    on_missing: OnMissing::from_exit_flag(!no_exit),
                };
                self.handler
                    .get_with(section, option, opts)
                    .with_context(|| format!("Failed to read [{}] {}", section, option))?
            }
            Commands::Getdict {
                section,
                option,
                separator,
                no_exit,
                json,
            } => {
                let items = self
                    .handler
                    .getdict_with(
                        section,
                        option,
                        separator,
                        OnMissing::from_exit_flag(!no_exit),
                    )
                    .with_context(|| format!("Failed to read [{}] {}", section, option))?;
                if *json {
                    serde_json::to_string(&items)?
                } else {
                    items.join("\n")
                }
            }
            Commands::Sections => self.handler.sections().join("\n"),
            Commands::Options { section } => self
                .handler
                .options(section)
                .with_context(|| format!("Failed to list options of [{}]", section))?
                .join("\n"),
            Commands::Dump { raw } => {
                let dump = Dump {
                    path: self.handler.filepath().display().to_string(),
                    sections: self.handler.snapshot(*raw)?,
                };
                serde_json::to_string_pretty(&dump)?
            }
            Commands::Path => self.handler.filepath().display().to_string(),
        };

        info!("Output: {}", output);
        Ok(output)
    }
}
