//! INI configuration handling.
//!
//! Creates the config file with defaults when absent, clears DEFAULT's
//! `OPTION` on every load, parses the file once and serves lookups with
//! `%(name)s` interpolation.

mod bootstrap;
mod handler;
mod interpolation;
mod location;
mod validation;

pub use bootstrap::{default_config_content, DEFAULT_OPTION, DEFAULT_SECTION};
pub use handler::ConfigHandler;
pub use interpolation::MAX_INTERPOLATION_DEPTH;
pub use location::{normalize_path, ConfigLocation, INI_EXTENSION};
