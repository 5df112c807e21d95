//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read values from a self-bootstrapping INI config file
#[derive(Parser)]
#[command(
    name = "confighandler",
    version,
    about = "Read values from a self-bootstrapping INI config file",
    long_about = "Opens <folder>/<name>.ini, creating it with a default [DEFAULT] section \
                  when absent, and prints the requested values. A missing section or \
                  option exits with status 1 unless --no-exit is given."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Folder holding the config file [default: ~/.config/confighandler]
    #[arg(long, short = 'f', global = true)]
    pub folder: Option<PathBuf>,

    /// Config file name; ".ini" is appended when missing
    #[arg(long, short = 'n', global = true, default_value = "config")]
    pub name: String,

    /// Enable debug logging to <folder>/logs
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print one option's value
    Get {
        section: String,
        option: String,

        /// Print the value without %(name)s substitution
        #[arg(long)]
        raw: bool,

        /// Print an empty line instead of exiting when the key is missing
        #[arg(long)]
        no_exit: bool,
    },
    /// Print a separated value as a list, one item per line
    Getdict {
        section: String,
        option: String,

        /// Item separator
        #[arg(long, short = 's', default_value = ",")]
        separator: String,

        /// Print nothing instead of exiting when the key is missing
        #[arg(long)]
        no_exit: bool,

        /// Print the list as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// List section names
    Sections,
    /// List option names visible from a section
    Options { section: String },
    /// Print every section written in the file as JSON
    Dump {
        /// Skip %(name)s substitution
        #[arg(long)]
        raw: bool,
    },
    /// Print the config file path (creating the file if needed)
    Path,
}
