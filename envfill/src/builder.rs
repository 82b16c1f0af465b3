//! Loader for populating records.
//!
//! The `Loader` resolves the environment file, picks a source, and assigns
//! the resulting values onto a record. The working directory and the
//! environment lookup default to the real process state and can both be
//! replaced, which keeps loading testable without touching globals.

use crate::assign::assign;
use crate::discovery::{env_file_exists, resolve_env_path, resolve_env_path_in};
use crate::error::Result;
use crate::record::{field_names, validate_pointer, Record};
use crate::source::{process_env, read_env, EnvLookup, FileSource, Source};
use std::path::{Path, PathBuf};

/// Loads configuration values from an environment file or the environment.
///
/// If `<working dir>/<file name>` exists, it is read in full. Otherwise each
/// of the record's field names is looked up as an environment variable.
///
/// # Examples
///
/// ```no_run
/// use envfill::{Loader, Record};
///
/// #[derive(Default, Record)]
/// #[allow(non_snake_case)]
/// struct Settings {
///     DATABASE_URL: String,
/// }
///
/// fn main() -> envfill::Result<()> {
///     let mut settings = Settings::default();
///     Loader::new()
///         .with_working_dir("/etc/myapp")
///         .with_file_name("myapp.env")
///         .load(&mut settings)?;
///     Ok(())
/// }
/// ```
pub struct Loader {
    file_name: Option<String>,
    working_dir: Option<PathBuf>,
    env_lookup: EnvLookup,
}

impl Loader {
    /// Create a loader using `.env` in the current directory and the process environment.
    pub fn new() -> Self {
        Self {
            file_name: None,
            working_dir: None,
            env_lookup: Box::new(process_env),
        }
    }

    /// Use a different environment file name. This is a name, not a path.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Resolve the environment file against `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Look variables up with `lookup` instead of the process environment.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Box::new(lookup);
        self
    }

    /// The path of the candidate environment file.
    pub fn env_path(&self) -> Result<PathBuf> {
        let file_name = self.file_name.as_deref();
        match &self.working_dir {
            Some(dir) => Ok(resolve_env_path_in(dir, file_name)),
            None => resolve_env_path(file_name),
        }
    }

    /// Populate `record`.
    pub fn load<R: Record>(&self, record: &mut R) -> Result<()> {
        let path = self.env_path()?;

        let values = if env_file_exists(&path) {
            tracing::debug!(path = %path.display(), "loading from environment file");
            FileSource::new(&path).read(&[])?
        } else {
            tracing::debug!(path = %path.display(), "no environment file, loading from environment");
            let names = field_names::<R>()?;
            read_env(&names, &self.env_lookup)
        };

        assign(record, &values)
    }

    /// Populate `record`, failing if it is absent.
    pub fn load_into<R: Record>(&self, record: Option<&mut R>) -> Result<()> {
        let record = validate_pointer(record)?;
        self.load(record)
    }

    /// Populate `record` from an explicit source, skipping file detection.
    pub fn load_from<R: Record>(&self, record: &mut R, source: &dyn Source) -> Result<()> {
        let names = field_names::<R>()?;
        tracing::debug!(source = source.name(), "loading from explicit source");
        let values = source.read(&names)?;
        assign(record, &values)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
