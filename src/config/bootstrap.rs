//! Default file generation and the DEFAULT.OPTION normalization pass.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{ConfigError, Result};

/// Name of the section whose keys every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Key written into a freshly generated file and cleared on every load.
pub const DEFAULT_OPTION: &str = "OPTION";

/// Content of a freshly generated config file.
pub fn default_config_content() -> String {
    format!("[{DEFAULT_SECTION}]\n{DEFAULT_OPTION} = \n")
}

/// Create `folder` and write the default file at `filepath`.
///
/// An already existing folder is fine; any other failure is returned.
pub fn generate_at(folder: &Path, filepath: &Path) -> Result<()> {
    if let Err(e) = fs::create_dir_all(folder) {
        if e.kind() != ErrorKind::AlreadyExists {
            return Err(ConfigError::io(folder, e));
        }
    }

    fs::write(filepath, default_config_content()).map_err(|e| ConfigError::io(filepath, e))?;
    info!(path = %filepath.display(), "Created default config file");

    Ok(())
}

/// Read the file, clearing a non-empty DEFAULT `OPTION` on disk first.
///
/// Returns the content that should be parsed.
pub fn read_normalized(filepath: &Path) -> Result<String> {
    let content = fs::read_to_string(filepath).map_err(|e| ConfigError::io(filepath, e))?;

    match clear_default_option(&content) {
        Some(updated) => {
            fs::write(filepath, &updated).map_err(|e| ConfigError::io(filepath, e))?;
            debug!(path = %filepath.display(), "Cleared DEFAULT.OPTION");
            Ok(updated)
        }
        None => Ok(content),
    }
}

/// Blank out every non-empty `OPTION` entry in the DEFAULT section.
///
/// Lines are classified the way the INI parser reads them: full-line
/// `;`/`#` comments, `[name]` headers with anything after the last `]`
/// ignored, and lines indented deeper than the current key continuing its
/// value. A cleared `OPTION` loses its continuation lines. Everything else
/// is kept byte-for-byte, line endings included.
///
/// Returns `None` when nothing had to change, or when a header has no
/// closing bracket (the parser reports that).
pub fn clear_default_option(content: &str) -> Option<String> {
    // Keys above the first header belong to DEFAULT as well
    let mut in_default = true;
    // Indent of the line that set the current key
    let mut key_indent: Option<usize> = None;
    let mut dropping = false;
    let mut changed = false;
    let mut out = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        let trimmed = body.trim();

        if trimmed.is_empty() || trimmed.starts_with([';', '#']) {
            out.push_str(line);
            continue;
        }

        if trimmed.starts_with('[') {
            let end = trimmed.rfind(']')?;
            in_default = trimmed[1..end].trim().eq_ignore_ascii_case(DEFAULT_SECTION);
            key_indent = None;
            dropping = false;
            out.push_str(line);
            continue;
        }

        let indent = body.len() - body.trim_start().len();
        if key_indent.is_some_and(|k| indent > k) {
            if dropping {
                changed = true;
            } else {
                out.push_str(line);
            }
            continue;
        }

        key_indent = Some(indent);
        dropping = false;

        if in_default {
            let (key, value) = match trimmed.find(['=', ':']) {
                Some(pos) => (trimmed[..pos].trim(), trimmed[pos + 1..].trim()),
                None => (trimmed, ""),
            };
            if key.eq_ignore_ascii_case(DEFAULT_OPTION) {
                dropping = true;
                if !value.is_empty() {
                    out.push_str(&body[..indent]);
                    out.push_str(key);
                    out.push_str(" = ");
                    out.push_str(ending);
                    changed = true;
                    continue;
                }
            }
        }

        out.push_str(line);
    }

    changed.then_some(out)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
