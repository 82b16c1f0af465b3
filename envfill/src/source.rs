//! Value sources.
//!
//! A [`Source`] produces a [`ValueMap`] for a set of requested field names.
//! The environment file is read whole, so [`FileSource`] ignores the names;
//! [`EnvSource`] looks up exactly the names it is given.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Field name to raw string value.
pub type ValueMap = HashMap<String, String>;

/// Looks up a single environment variable by name.
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A source of configuration values.
pub trait Source {
    /// Produce values for the given field names.
    fn read(&self, names: &[&str]) -> Result<ValueMap>;

    /// Get a human-readable name for this source (used in log output).
    fn name(&self) -> &str;
}

/// Reads `KEY=VALUE` lines from an environment file.
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Create a new file source from a path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: path.to_string_lossy().into_owned(),
            path,
        }
    }

    /// Get the path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn read(&self, _names: &[&str]) -> Result<ValueMap> {
        read_file(&self.path)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Read and parse the environment file at `path`.
///
/// The handle is dropped before returning on every path.
pub fn read_file(path: &Path) -> Result<ValueMap> {
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = BufReader::new(file)
        .split(b'\n')
        .map(|line| line.map(decode_line))
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(|source| Error::Scan {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), lines = lines.len(), "read environment file");
    Ok(parse_lines(lines))
}

/// Strip a trailing `\r` and decode, replacing invalid UTF-8.
fn decode_line(mut line: Vec<u8>) -> String {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    match String::from_utf8(line) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Build a value map from environment file lines.
///
/// A line splitting into exactly two parts on `=` is `KEY=VALUE`. Any other
/// line, including one with several `=`, becomes a key with an empty value.
pub fn parse_lines<I, S>(lines: I) -> ValueMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = ValueMap::new();

    for line in lines {
        let line = line.as_ref();
        let parts: Vec<&str> = line.split('=').collect();
        if let [key, value] = parts.as_slice() {
            values.insert((*key).to_string(), (*value).to_string());
        } else {
            values.insert(line.to_string(), String::new());
        }
    }

    values
}

/// Reads named variables from the process environment.
///
/// Every requested name appears in the result; unset variables map to "".
pub struct EnvSource {
    lookup: EnvLookup,
}

impl EnvSource {
    /// Create a source backed by the real process environment.
    pub fn new() -> Self {
        Self::with_lookup(process_env)
    }

    /// Create a source backed by a custom lookup function.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for EnvSource {
    fn read(&self, names: &[&str]) -> Result<ValueMap> {
        Ok(read_env(names, &self.lookup))
    }

    fn name(&self) -> &str {
        "environment"
    }
}

/// Look up each name, defaulting unset variables to the empty string.
pub fn read_env<F>(names: &[&str], lookup: F) -> ValueMap
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .map(|name| (name.to_string(), lookup(name).unwrap_or_default()))
        .collect()
}

/// Lookup against the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
}

/// A source that holds values in memory.
///
/// Useful for testing or providing fixed values.
pub struct MemorySource {
    values: ValueMap,
    source_name: String,
}

impl MemorySource {
    /// Create a new memory source with the given values.
    pub fn new(values: ValueMap) -> Self {
        Self {
            values,
            source_name: "memory".to_string(),
        }
    }

    /// Create a new memory source with a custom name.
    pub fn with_name(values: ValueMap, name: impl Into<String>) -> Self {
        Self {
            values,
            source_name: name.into(),
        }
    }
}

impl Source for MemorySource {
    fn read(&self, _names: &[&str]) -> Result<ValueMap> {
        Ok(self.values.clone())
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}
