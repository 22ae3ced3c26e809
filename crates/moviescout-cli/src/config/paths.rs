//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolves the config directory.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.config/moviescout`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("moviescout"))
}

/// Resolves the config file path (`{config_dir}/config.toml`).
///
/// # Errors
///
/// See [`resolve_config_dir`].
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_config_dir(dir)?.join("config.toml"))
}

/// Resolves the browser log file path (`{config_dir}/moviescout.log`).
///
/// # Errors
///
/// See [`resolve_config_dir`].
pub fn resolve_log_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_config_dir(dir)?.join("moviescout.log"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/moviescout-test");

        // Act
        let config = resolve_config_path(Some(&dir)).unwrap();
        let log = resolve_log_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(config, PathBuf::from("/tmp/moviescout-test/config.toml"));
        assert_eq!(log, PathBuf::from("/tmp/moviescout-test/moviescout.log"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_config_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".config/moviescout/config.toml"));
    }
}
