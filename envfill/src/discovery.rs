//! Environment file location.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// File name used when no override is given.
pub const DEFAULT_FILE_NAME: &str = ".env";

/// Resolve the environment file against the process working directory.
pub fn resolve_env_path(file_name: Option<&str>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(Error::WorkingDirectory)?;
    Ok(resolve_env_path_in(&cwd, file_name))
}

/// Resolve the environment file against an explicit directory.
pub fn resolve_env_path_in(dir: &Path, file_name: Option<&str>) -> PathBuf {
    dir.join(file_name.unwrap_or(DEFAULT_FILE_NAME))
}

/// Check whether anything is reachable at `path`.
///
/// Any stat failure counts as absent, permission errors included.
pub fn env_file_exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "environment file not accessible, treating as absent"
                );
            }
            false
        }
    }
}
