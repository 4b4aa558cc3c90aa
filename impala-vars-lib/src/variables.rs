//! Parsing of the flat `name=value` variables file.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::VarsError;

const SEPARATOR: char = '=';

/// Substitution variables loaded from a configuration file.
///
/// Names are unique; when a name appears on several lines the last value
/// wins. Iteration is ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    /// Reads and parses the variables file at `path` as UTF-8.
    pub fn from_file(path: &Path) -> Result<Self, VarsError> {
        let content = fs::read_to_string(path).map_err(|source| VarsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let variables = content.parse::<Variables>()?;
        log::debug!("Variables from config file: {variables}");
        Ok(variables)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Sets `name` to `value`, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for Variables {
    type Err = VarsError;

    /// Parses `name=value` lines. Blank lines are skipped; any other line
    /// must contain exactly one `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut variables = Variables::default();

        for (index, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let (name, value) = split_line(line).ok_or_else(|| VarsError::InvalidLine {
                line_number: index + 1,
                line: line.to_string(),
            })?;

            if let Some(previous) = variables.insert(name, value) {
                log::debug!(
                    "Variable '{name}' redefined on line {}, dropping '{previous}'",
                    index + 1
                );
            }
        }

        Ok(variables)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Variables::default();
        for (name, value) in iter {
            variables.insert(name, value);
        }
        variables
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name:?}: {value:?}")?;
        }
        f.write_str("}")
    }
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(value), None) => Some((name.trim(), value.trim())),
        _ => None,
    }
}
