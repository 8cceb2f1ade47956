//! `key = value` parameter files.
//!
//! The parameter file supplies default rates and baseline dollar amounts.
//! Blank lines and lines starting with `#` are ignored, as are lines without
//! an `=`. Only the first `=` splits key from value, so values may contain `=`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Parameter file errors.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// The parameter file does not exist.
    #[error("parameter file '{}' not found", .0.display())]
    NotFound(PathBuf),

    /// The parameter file could not be read.
    #[error("failed to read parameter file '{}': {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A value could not be parsed as the requested type.
    #[error("invalid value for '{key}': {value:?}")]
    Invalid {
        /// Parameter key.
        key: String,
        /// Raw value from the file.
        value: String,
    },
}

/// Flat string-keyed parameters loaded from a `key = value` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Parses parameter text. Later keys override earlier ones.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();

        Self { values }
    }

    /// Reads and parses a parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParameterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ParameterError::NotFound(path.to_path_buf())
            } else {
                ParameterError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let params = Self::parse(&text);
        tracing::debug!(path = %path.display(), count = params.len(), "Loaded parameter file");
        Ok(params)
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameters were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses a key as a decimal; `None` if absent.
    pub fn decimal(&self, key: &str) -> Result<Option<Decimal>, ParameterError> {
        self.parsed(key)
    }

    /// Parses a key as a decimal, falling back to `default` if absent.
    pub fn decimal_or(&self, key: &str, default: Decimal) -> Result<Decimal, ParameterError> {
        Ok(self.decimal(key)?.unwrap_or(default))
    }

    /// Parses a key as a non-negative count; `None` if absent.
    pub fn count(&self, key: &str) -> Result<Option<u32>, ParameterError> {
        self.parsed(key)
    }

    /// Parses a key as a count, falling back to `default` if absent.
    pub fn count_or(&self, key: &str, default: u32) -> Result<u32, ParameterError> {
        Ok(self.count(key)?.unwrap_or(default))
    }

    /// Parses a key as a boolean flag (`true/false`, `yes/no`, `1/0`).
    pub fn flag_or(&self, key: &str, default: bool) -> Result<bool, ParameterError> {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };

        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(invalid(key, raw)),
        }
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, ParameterError> {
        self.get(key)
            .map(|raw| raw.parse::<T>().map_err(|_| invalid(key, raw)))
            .transpose()
    }
}

fn invalid(key: &str, raw: &str) -> ParameterError {
    ParameterError::Invalid {
        key: key.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let params = ParameterSet::parse("key1 = value1\nkey2 = 0.59\n");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("key1"), Some("value1"));
        assert_eq!(params.get("key2"), Some("0.59"));
    }

    #[test]
    fn test_parse_comments_and_blanks() {
        let params = ParameterSet::parse("# comment\n\nkey = val\n  # indented comment\n");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("key"), Some("val"));
    }

    #[test]
    fn test_parse_whitespace_stripping() {
        let params = ParameterSet::parse("  key_with_spaces   =   value_with_spaces  \n");
        assert_eq!(params.get("key_with_spaces"), Some("value_with_spaces"));
    }

    #[test]
    fn test_parse_equals_in_value() {
        let params = ParameterSet::parse("key = a=b\n");
        assert_eq!(params.get("key"), Some("a=b"));
    }

    #[test]
    fn test_line_without_equals_is_skipped() {
        let params = ParameterSet::parse("valid = yes\ninvalid line\n");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("valid"), Some("yes"));
    }

    #[test]
    fn test_later_key_overrides() {
        let params = ParameterSet::parse("travel = 1000\ntravel = 2500\n");
        assert_eq!(params.decimal("travel").unwrap(), Some(dec!(2500)));
    }

    #[test]
    fn test_typed_lookups() {
        let params = ParameterSet::parse("rate = 0.0211\nyears = 3\nflag = yes\nbad = lots\n");

        assert_eq!(params.decimal("rate").unwrap(), Some(dec!(0.0211)));
        assert_eq!(params.decimal("missing").unwrap(), None);
        assert_eq!(params.decimal_or("missing", dec!(7)).unwrap(), dec!(7));
        assert_eq!(params.count_or("years", 1).unwrap(), 3);
        assert_eq!(params.count_or("missing", 1).unwrap(), 1);
        assert!(params.flag_or("flag", false).unwrap());
        assert!(!params.flag_or("missing", false).unwrap());

        let err = params.decimal("bad").unwrap_err();
        assert!(matches!(err, ParameterError::Invalid { ref key, .. } if key == "bad"));
        assert!(params.count("rate").is_err());
        assert!(params.flag_or("bad", true).is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# defaults").unwrap();
        writeln!(file, "indirect_rate = 0.59").unwrap();
        writeln!(file, "fringe_rate = 0.0211").unwrap();

        let params = ParameterSet::load(file.path()).unwrap();
        assert_eq!(params.decimal("indirect_rate").unwrap(), Some(dec!(0.59)));
        assert_eq!(params.decimal("fringe_rate").unwrap(), Some(dec!(0.0211)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.par");

        let err = ParameterSet::load(&path).unwrap_err();
        assert!(matches!(err, ParameterError::NotFound(_)));
        assert!(err.to_string().contains("budget.par"));
    }
}
