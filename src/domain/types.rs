//! Accessor option types.

/// What a getter does when the section or option does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnMissing {
    /// Print the error and terminate the process with status 1 (default)
    #[default]
    Exit,
    /// Print the error and return an empty string
    Empty,
}

impl OnMissing {
    /// Map the classic `exit_if_not_exist` flag onto a policy.
    pub fn from_exit_flag(exit_if_not_exist: bool) -> Self {
        if exit_if_not_exist {
            Self::Exit
        } else {
            Self::Empty
        }
    }

    /// Exit status used when the process is terminated.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Options accepted by `ConfigHandler::get_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Return the literal value without `%(name)s` substitution
    pub raw: bool,

    /// Missing-key policy
    pub on_missing: OnMissing,
}

impl GetOptions {
    /// Interpolated lookup that returns `""` instead of exiting.
    pub fn or_empty() -> Self {
        Self {
            raw: false,
            on_missing: OnMissing::Empty,
        }
    }

    /// Same options, with `raw` set.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }
}

/// Separator used by `getdict` when none is given.
pub const DEFAULT_DICT_SEPARATOR: &str = ",";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exit_and_interpolate() {
        let opts = GetOptions::default();
        assert!(!opts.raw);
        assert_eq!(opts.on_missing, OnMissing::Exit);
    }

    #[test]
    fn test_from_exit_flag() {
        assert_eq!(OnMissing::from_exit_flag(true), OnMissing::Exit);
        assert_eq!(OnMissing::from_exit_flag(false), OnMissing::Empty);
    }

    #[test]
    fn test_builder() {
        let opts = GetOptions::or_empty().raw(true);
        assert!(opts.raw);
        assert_eq!(opts.on_missing, OnMissing::Empty);
    }
}
