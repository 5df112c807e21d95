//! Config file location: folder, normalized name and full path.

use std::path::{Component, Path, PathBuf};

use super::validation;
use crate::domain::Result;

/// Extension every config file carries.
pub const INI_EXTENSION: &str = ".ini";

/// Where a config file lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    folderpath: PathBuf,
    name: String,
    filepath: PathBuf,
}

impl ConfigLocation {
    /// Resolve a folder and base name into a location.
    ///
    /// The name gets `.ini` appended unless it already ends with it
    /// (checked case-insensitively, so `settings.INI` is left alone).
    pub fn new(folderpath: impl AsRef<Path>, name: &str) -> Result<Self> {
        let folderpath = folderpath.as_ref();
        validation::validate_location(folderpath, name)?;

        let folderpath = normalize_path(folderpath);
        let name = with_ini_extension(name);
        let filepath = normalize_path(&folderpath.join(&name));

        Ok(Self {
            folderpath,
            name,
            filepath,
        })
    }

    /// Normalized folder path.
    pub fn folderpath(&self) -> &Path {
        &self.folderpath
    }

    /// File name including the `.ini` extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized full path of the file.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

/// Append `.ini` unless the name already ends with it in any case.
pub fn with_ini_extension(name: &str) -> String {
    if name.to_lowercase().ends_with(INI_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{INI_EXTENSION}")
    }
}

/// Lexically normalize a path without touching the filesystem.
///
/// Collapses redundant separators and `.` segments and folds `dir/..`.
/// Leading `..` is kept on relative paths and dropped at the root.
/// An empty result becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }

    parts.iter().map(|c| c.as_os_str()).collect()
}
