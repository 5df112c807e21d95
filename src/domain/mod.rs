//! Domain layer shared by the library and the CLI.
//!
//! This module contains:
//! - The library error type
//! - Accessor option types (missing-key policy)
//! - Logger with rotation

mod error;
pub mod logger;
mod types;

pub use error::{ConfigError, Result};
pub use types::{GetOptions, OnMissing, DEFAULT_DICT_SEPARATOR};
