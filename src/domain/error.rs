//! Error types for confighandler.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for confighandler.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Requested section is not present in the file
    #[error("No section: '{section}'")]
    NoSection { section: String },

    /// Requested option is not visible from the section
    #[error("No option '{option}' in section: '{section}'")]
    NoOption { section: String, option: String },

    /// Filesystem error while bootstrapping or reading the file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed INI content, as reported by the parser
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// Folder or file name rejected before touching the filesystem
    #[error("Invalid config location: {0}")]
    InvalidLocation(String),

    /// A `%` that is not followed by `%` or a well-formed `(name)s`
    #[error("Bad interpolation in option '{option}' of section '{section}': {message}")]
    InterpolationSyntax {
        section: String,
        option: String,
        message: String,
    },

    /// A `%(name)s` placeholder that refers to nothing
    #[error(
        "Bad value substitution: option '{option}' in section '{section}' contains an \
         interpolation key '{reference}' which is not a valid option name. Raw value: '{rawval}'"
    )]
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
        rawval: String,
    },

    /// Placeholders nested deeper than the recursion limit
    #[error(
        "Recursion limit exceeded in value substitution: option '{option}' in section \
         '{section}' contains an interpolation key which cannot be substituted in {max_depth} \
         steps. Raw value: '{rawval}'"
    )]
    InterpolationDepth {
        section: String,
        option: String,
        rawval: String,
        max_depth: usize,
    },

    /// `getdict` called with an empty separator
    #[error("List separator cannot be empty")]
    InvalidSeparator,

    /// Typed getter could not convert the stored string
    #[error("Cannot convert option '{option}' in section '{section}' to {kind}: '{value}'")]
    Conversion {
        section: String,
        option: String,
        value: String,
        kind: &'static str,
    },
}

impl ConfigError {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the two "key not found" kinds that the getters handle locally.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::NoSection { .. } | Self::NoOption { .. })
    }
}
