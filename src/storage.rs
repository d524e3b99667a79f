//! Database location resolution
//!
//! Both the session store and the task store share one SQLite database
//! file. The path is resolved from, in order: the `FOCUSTRACK_DB`
//! environment variable, the configured storage path, and finally the
//! platform data directory.

use crate::error::{FocustrackError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the database location
///
/// This makes it easy to point the binary at a test database or an
/// alternate file without changing the user's application data dir.
pub const DB_ENV_VAR: &str = "FOCUSTRACK_DB";

/// Resolve the database file path
///
/// # Arguments
///
/// * `configured` - Optional path from the loaded configuration
///
/// # Errors
///
/// Returns `FocustrackError::Storage` if no override is present and the
/// platform data directory cannot be determined.
pub fn resolve_db_path(configured: Option<&str>) -> Result<PathBuf> {
    if let Ok(override_path) = std::env::var(DB_ENV_VAR) {
        return Ok(PathBuf::from(override_path));
    }

    if let Some(path) = configured {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "focustrack", "focustrack")
        .ok_or_else(|| FocustrackError::Storage("Could not determine data directory".into()))?;

    Ok(proj_dirs.data_dir().join("focustrack.db"))
}

/// Create the parent directory of a database file if it is missing
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| FocustrackError::Storage(format!("Failed to create data dir: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_resolve_db_path_prefers_env_override() {
        env::set_var(DB_ENV_VAR, "/tmp/focustrack-test.db");
        let path = resolve_db_path(Some("/elsewhere/config.db")).expect("resolve failed");
        assert_eq!(path, PathBuf::from("/tmp/focustrack-test.db"));
        env::remove_var(DB_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_resolve_db_path_uses_configured_path() {
        env::remove_var(DB_ENV_VAR);
        let path = resolve_db_path(Some("/elsewhere/config.db")).expect("resolve failed");
        assert_eq!(path, PathBuf::from("/elsewhere/config.db"));
    }

    #[test]
    #[serial]
    fn test_resolve_db_path_falls_back_to_data_dir() {
        env::remove_var(DB_ENV_VAR);
        let path = resolve_db_path(None).expect("resolve failed");
        assert!(path.ends_with("focustrack.db"));
    }

    #[test]
    fn test_ensure_parent_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let nested = dir.path().join("a").join("b").join("focustrack.db");
        ensure_parent_dir(&nested).expect("ensure failed");
        assert!(nested.parent().unwrap().exists());
    }
}
