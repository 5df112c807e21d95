//! confighandler: self-bootstrapping INI configuration
//!
//! Opens `<folder>/<name>.ini`, creating it with a default `[DEFAULT]`
//! section when it does not exist, and exposes getters that either exit the
//! process or fall back to an empty string when a key is missing.
//!
//! ```no_run
//! use confighandler::{ConfigHandler, GetOptions};
//!
//! # fn main() -> confighandler::Result<()> {
//! let config = ConfigHandler::new("/tmp/app", "cfg")?;
//! let host = config.get_with("server", "host", GetOptions::or_empty())?;
//! let peers = config.getdict("server", "peers")?;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod domain;

pub use config::{
    default_config_content, normalize_path, ConfigHandler, ConfigLocation, DEFAULT_OPTION,
    DEFAULT_SECTION, INI_EXTENSION, MAX_INTERPOLATION_DEPTH,
};
pub use domain::{ConfigError, GetOptions, OnMissing, Result, DEFAULT_DICT_SEPARATOR};
