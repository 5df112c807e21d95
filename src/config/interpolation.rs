//! `%(name)s` value substitution.
//!
//! Placeholders are resolved against every option visible from the section
//! being read (the section itself, DEFAULT, then the environment snapshot).
//! Substituted values are expanded again until they contain no `%`, up to
//! [`MAX_INTERPOLATION_DEPTH`] levels.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{ConfigError, Result};

/// Maximum nesting of placeholder expansion.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^%\(([^)]+)\)s").expect("placeholder pattern is valid"))
}

/// Expand placeholders in `rawval`, the value of `option` in `section`.
///
/// `lookup` receives lower-cased option names.
pub fn interpolate<F>(section: &str, option: &str, rawval: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut accum = String::with_capacity(rawval.len());
    expand(section, option, rawval, rawval, &lookup, &mut accum, 1)?;
    Ok(accum)
}

fn expand<F>(
    section: &str,
    option: &str,
    rawval: &str,
    rest: &str,
    lookup: &F,
    accum: &mut String,
    depth: usize,
) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(ConfigError::InterpolationDepth {
            section: section.to_string(),
            option: option.to_string(),
            rawval: rawval.to_string(),
            max_depth: MAX_INTERPOLATION_DEPTH,
        });
    }

    let mut rest = rest;
    while !rest.is_empty() {
        let Some(p) = rest.find('%') else {
            accum.push_str(rest);
            return Ok(());
        };
        accum.push_str(&rest[..p]);
        rest = &rest[p..];

        match rest[1..].chars().next() {
            Some('%') => {
                accum.push('%');
                rest = &rest[2..];
            }
            Some('(') => {
                let Some(caps) = key_pattern().captures(rest) else {
                    return Err(syntax_error(
                        section,
                        option,
                        format!("bad interpolation variable reference '{rest}'"),
                    ));
                };
                let reference = caps[1].to_lowercase();
                rest = &rest[caps[0].len()..];

                let value = lookup(&reference).ok_or_else(|| {
                    ConfigError::InterpolationMissingOption {
                        section: section.to_string(),
                        option: option.to_string(),
                        reference: reference.clone(),
                        rawval: rawval.to_string(),
                    }
                })?;

                if value.contains('%') {
                    expand(section, option, rawval, &value, lookup, accum, depth + 1)?;
                } else {
                    accum.push_str(&value);
                }
            }
            _ => {
                return Err(syntax_error(
                    section,
                    option,
                    format!("'%' must be followed by '%' or '(', found: '{rest}'"),
                ));
            }
        }
    }

    Ok(())
}

fn syntax_error(section: &str, option: &str, message: String) -> ConfigError {
    ConfigError::InterpolationSyntax {
        section: section.to_string(),
        option: option.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn run(rawval: &str, vars: &[(&str, &str)]) -> Result<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        interpolate("app", "value", rawval, |name| map.get(name).cloned())
    }

    #[test]
    fn test_plain_value_untouched() {
        assert_eq!(run("hello world", &[]).unwrap(), "hello world");
        assert_eq!(run("", &[]).unwrap(), "");
    }

    #[test]
    fn test_simple_substitution() {
        let vars = [("home", "/home/me")];
        assert_eq!(run("%(home)s/data", &vars).unwrap(), "/home/me/data");
    }

    #[test]
    fn test_reference_is_case_folded() {
        let vars = [("home", "/home/me")];
        assert_eq!(run("%(HOME)s", &vars).unwrap(), "/home/me");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(run("100%%", &[]).unwrap(), "100%");
        assert_eq!(run("%%(home)s", &[]).unwrap(), "%(home)s");
    }

    #[test]
    fn test_nested_substitution() {
        let vars = [("base", "/srv"), ("data", "%(base)s/data")];
        assert_eq!(run("%(data)s/cache", &vars).unwrap(), "/srv/data/cache");
    }

    #[test]
    fn test_missing_reference() {
        let err = run("%(nope)s", &[]).unwrap_err();
        match err {
            ConfigError::InterpolationMissingOption { reference, .. } => {
                assert_eq!(reference, "nope")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_syntax() {
        assert!(matches!(
            run("50%", &[]),
            Err(ConfigError::InterpolationSyntax { .. })
        ));
        assert!(matches!(
            run("%x", &[]),
            Err(ConfigError::InterpolationSyntax { .. })
        ));
        assert!(matches!(
            run("%(unclosed", &[]),
            Err(ConfigError::InterpolationSyntax { .. })
        ));
    }

    #[test]
    fn test_self_reference_hits_depth_limit() {
        let vars = [("loop", "%(loop)s")];
        assert!(matches!(
            run("%(loop)s", &vars),
            Err(ConfigError::InterpolationDepth { max_depth: 10, .. })
        ));
    }
}
