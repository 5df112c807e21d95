//! The config handler: bootstrap, load once, and answer lookups.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::process;

use configparser::ini::{Ini, IniDefault};
use tracing::{debug, warn};

use super::bootstrap::{self, DEFAULT_SECTION};
use super::interpolation;
use super::location::ConfigLocation;
use crate::domain::{ConfigError, GetOptions, OnMissing, Result, DEFAULT_DICT_SEPARATOR};

/// Options of one section as produced by the parser. `None` marks a key
/// written without a delimiter.
type Section = HashMap<String, Option<String>>;

/// Name the parser files DEFAULT entries under once names are lower-cased.
const PARSER_DEFAULT_SECTION: &str = "default";

/// Self-bootstrapping INI configuration.
///
/// Construction guarantees the file exists, normalizes it and parses it
/// exactly once. Section and option names are case-insensitive. Every
/// section inherits the DEFAULT section, which in turn sits on top of an
/// environment snapshot used for `%(name)s` interpolation.
#[derive(Debug, Clone)]
pub struct ConfigHandler {
    location: ConfigLocation,
    sections: HashMap<String, Section>,
    defaults: Section,
    env: HashMap<String, String>,
}

impl ConfigHandler {
    /// Open (or create) `<folderpath>/<name>.ini`, with the process
    /// environment as the interpolation fallback.
    pub fn new(folderpath: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::with_env(folderpath, name, process_env())
    }

    /// Open (or create) the file with an explicit environment snapshot.
    pub fn with_env<I, K, V>(folderpath: impl AsRef<Path>, name: &str, env: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let location = ConfigLocation::new(folderpath, name)?;
        let filepath = location.filepath();

        if !filepath.exists() {
            bootstrap::generate_at(location.folderpath(), filepath)?;
        }

        let content = bootstrap::read_normalized(filepath)?;

        let mut parser = ini_parser();
        let mut sections = parser
            .read(content)
            .map_err(|message| ConfigError::Parse {
                path: filepath.to_path_buf(),
                message,
            })?;
        let defaults = sections.remove(PARSER_DEFAULT_SECTION).unwrap_or_default();

        let env = env
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v.into()))
            .collect();

        debug!(
            path = %filepath.display(),
            sections = sections.len(),
            defaults = defaults.len(),
            "Loaded config"
        );

        Ok(Self {
            location,
            sections,
            defaults,
            env,
        })
    }

    /// Normalized folder holding the file.
    pub fn folderpath(&self) -> &Path {
        self.location.folderpath()
    }

    /// File name, `.ini` extension included.
    pub fn name(&self) -> &str {
        self.location.name()
    }

    /// Normalized full path of the file.
    pub fn filepath(&self) -> &Path {
        self.location.filepath()
    }

    /// Look up an option without any missing-key handling.
    ///
    /// This is the tagged primitive the getters are built on: a missing
    /// section or option comes back as [`ConfigError::NoSection`] or
    /// [`ConfigError::NoOption`] and the caller decides what to do.
    pub fn lookup(&self, section: &str, option: &str, raw: bool) -> Result<String> {
        let scope = self.scope(section)?;
        let option = option.to_lowercase();

        let value = self
            .resolve(scope, &option)
            .ok_or_else(|| ConfigError::NoOption {
                section: section.to_string(),
                option: option.clone(),
            })?;

        if raw {
            return Ok(value);
        }

        interpolation::interpolate(section, &option, &value, |name| self.resolve(scope, name))
    }

    /// Interpolated value; exits the process with status 1 if missing.
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        self.get_with(section, option, GetOptions::default())
    }

    /// Value with explicit `raw` and missing-key policy.
    ///
    /// A missing section or option prints `Error: <reason>` to stderr,
    /// then exits or yields `""` depending on `opts.on_missing`.
    /// Interpolation failures are returned as errors.
    pub fn get_with(&self, section: &str, option: &str, opts: GetOptions) -> Result<String> {
        match self.lookup(section, option, opts.raw) {
            Err(e) if e.is_missing() => Ok(report_missing(&e, opts.on_missing)),
            other => other,
        }
    }

    /// Comma separated value as a list; exits if missing.
    ///
    /// Despite the name the result is an ordered sequence, not a mapping.
    pub fn getdict(&self, section: &str, option: &str) -> Result<Vec<String>> {
        self.getdict_with(section, option, DEFAULT_DICT_SEPARATOR, OnMissing::Exit)
    }

    /// Split a value on `separator` after removing all whitespace.
    ///
    /// Empty or missing (with [`OnMissing::Empty`]) values give an empty list.
    pub fn getdict_with(
        &self,
        section: &str,
        option: &str,
        separator: &str,
        on_missing: OnMissing,
    ) -> Result<Vec<String>> {
        if separator.is_empty() {
            return Err(ConfigError::InvalidSeparator);
        }

        let opts = GetOptions {
            raw: false,
            on_missing,
        };
        let value: String = self
            .get_with(section, option, opts)?
            .split_whitespace()
            .collect();

        if value.is_empty() {
            return Ok(Vec::new());
        }
        Ok(value.split(separator).map(str::to_string).collect())
    }

    /// Integer value; exits if missing.
    pub fn getint(&self, section: &str, option: &str) -> Result<i64> {
        self.getint_with(section, option, OnMissing::Exit)
    }

    /// Integer value with an explicit missing-key policy.
    pub fn getint_with(&self, section: &str, option: &str, on_missing: OnMissing) -> Result<i64> {
        self.get_converted(section, option, on_missing, "integer", |v| v.parse().ok())
    }

    /// Float value; exits if missing.
    pub fn getfloat(&self, section: &str, option: &str) -> Result<f64> {
        self.getfloat_with(section, option, OnMissing::Exit)
    }

    /// Float value with an explicit missing-key policy.
    pub fn getfloat_with(&self, section: &str, option: &str, on_missing: OnMissing) -> Result<f64> {
        self.get_converted(section, option, on_missing, "float", |v| v.parse().ok())
    }

    /// Boolean value; exits if missing.
    ///
    /// Accepts `1`, `yes`, `true`, `on` and `0`, `no`, `false`, `off`.
    pub fn getboolean(&self, section: &str, option: &str) -> Result<bool> {
        self.getboolean_with(section, option, OnMissing::Exit)
    }

    /// Boolean value with an explicit missing-key policy.
    pub fn getboolean_with(
        &self,
        section: &str,
        option: &str,
        on_missing: OnMissing,
    ) -> Result<bool> {
        self.get_converted(section, option, on_missing, "boolean", parse_boolean)
    }

    /// Section names in sorted order. DEFAULT is not listed.
    pub fn sections(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self.sections.keys().collect();
        names.into_iter().cloned().collect()
    }

    /// Whether the file has `section`. DEFAULT does not count.
    pub fn has_section(&self, section: &str) -> bool {
        !is_default_section(section) && self.sections.contains_key(&section.to_lowercase())
    }

    /// Whether `option` resolves from `section`, DEFAULT or the environment.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        match self.scope(section) {
            Ok(scope) => self.resolve(scope, &option.to_lowercase()).is_some(),
            Err(_) => false,
        }
    }

    /// Sorted option names visible from `section`, environment included.
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        let scope = self.scope(section)?;
        Ok(self.visible_keys(scope, true).into_iter().collect())
    }

    /// Sorted `(option, value)` pairs visible from `section`, environment included.
    pub fn items(&self, section: &str, raw: bool) -> Result<Vec<(String, String)>> {
        self.collect_items(section, raw, true)
    }

    /// Like [`items`](Self::items) but limited to keys written in the file.
    pub fn file_items(&self, section: &str, raw: bool) -> Result<Vec<(String, String)>> {
        self.collect_items(section, raw, false)
    }

    /// Every section's file items, DEFAULT first.
    pub fn snapshot(&self, raw: bool) -> Result<BTreeMap<String, BTreeMap<String, String>>> {
        let mut out = BTreeMap::new();
        let mut names = vec![DEFAULT_SECTION.to_string()];
        names.extend(self.sections());

        for name in names {
            let items = self.file_items(&name, raw)?;
            out.insert(name, items.into_iter().collect());
        }
        Ok(out)
    }

    fn collect_items(
        &self,
        section: &str,
        raw: bool,
        with_env: bool,
    ) -> Result<Vec<(String, String)>> {
        let scope = self.scope(section)?;
        self.visible_keys(scope, with_env)
            .into_iter()
            .map(|option| -> Result<(String, String)> {
                let value = self.lookup(section, &option, raw)?;
                Ok((option, value))
            })
            .collect()
    }

    fn get_converted<T, F>(
        &self,
        section: &str,
        option: &str,
        on_missing: OnMissing,
        kind: &'static str,
        convert: F,
    ) -> Result<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let opts = GetOptions {
            raw: false,
            on_missing,
        };
        let value = self.get_with(section, option, opts)?;
        convert(value.trim()).ok_or_else(|| ConfigError::Conversion {
            section: section.to_string(),
            option: option.to_lowercase(),
            value,
            kind,
        })
    }

    /// `Ok(None)` is the DEFAULT scope; otherwise the named section.
    fn scope(&self, section: &str) -> Result<Option<&Section>> {
        if is_default_section(section) {
            return Ok(None);
        }
        self.sections
            .get(&section.to_lowercase())
            .map(Some)
            .ok_or_else(|| ConfigError::NoSection {
                section: section.to_string(),
            })
    }

    /// Section first, then DEFAULT, then the environment.
    fn resolve(&self, scope: Option<&Section>, option: &str) -> Option<String> {
        scope
            .and_then(|s| s.get(option))
            .or_else(|| self.defaults.get(option))
            .map(|v| v.clone().unwrap_or_default())
            .or_else(|| self.env.get(option).cloned())
    }

    fn visible_keys(&self, scope: Option<&Section>, with_env: bool) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self.defaults.keys().cloned().collect();
        if let Some(section) = scope {
            keys.extend(section.keys().cloned());
        }
        if with_env {
            keys.extend(self.env.keys().cloned());
        }
        keys
    }
}

/// Parser with standard INI rules: comments only on their own line and
/// indented lines continuing the previous value.
fn ini_parser() -> Ini {
    let mut defaults = IniDefault::default();
    defaults.enable_inline_comments = false;
    defaults.multiline = true;
    Ini::new_from_defaults(defaults)
}

fn is_default_section(section: &str) -> bool {
    section.eq_ignore_ascii_case(DEFAULT_SECTION)
}

/// Print the missing-key error, then exit or fall back to `""`.
fn report_missing(err: &ConfigError, on_missing: OnMissing) -> String {
    eprintln!("Error: {err}");
    warn!(policy = ?on_missing, "{}", err);

    match on_missing {
        OnMissing::Exit => process::exit(on_missing.exit_code()),
        OnMissing::Empty => String::new(),
    }
}

fn parse_boolean(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Snapshot of the process environment; non UTF-8 entries are skipped.
fn process_env() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}
