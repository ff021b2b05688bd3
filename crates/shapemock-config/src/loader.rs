//! Config file discovery and loading.
//!
//! [`load`] resolves the config in this order:
//! 1. The file named by `SHAPEMOCK_CONFIG`, if set (it must exist)
//! 2. The nearest `shapemock.toml` found walking up from the start directory
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::types::MockConfig;
use crate::validate;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "shapemock.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SHAPEMOCK_CONFIG";

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1_048_576;

/// Load the configuration that applies to `start_dir`.
///
/// Usually called with `env!("CARGO_MANIFEST_DIR")` from a test crate.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the selected file cannot be read, parsed, or
/// fails validation.
pub fn load(start_dir: &Path) -> ConfigResult<MockConfig> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_with_override(start_dir, explicit.as_deref())
}

/// Same as [`load`] with the environment override passed explicitly.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the selected file cannot be read, parsed, or
/// fails validation.
pub fn load_with_override(start_dir: &Path, explicit: Option<&Path>) -> ConfigResult<MockConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config from {CONFIG_ENV_VAR}");
        return load_file(path);
    }

    match discover(start_dir) {
        Some(path) => {
            debug!(path = %path.display(), "discovered config file");
            load_file(&path)
        },
        None => {
            debug!(start = %start_dir.display(), "no config file found, using defaults");
            Ok(MockConfig::default())
        },
    }
}

/// Find the nearest [`CONFIG_FILE_NAME`] in `start_dir` or its ancestors.
#[must_use]
pub fn discover(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load a config from a specific file path.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, is larger than
/// 1 MB, cannot be parsed, or fails validation.
pub fn load_file(path: &Path) -> ConfigResult<MockConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    // Check size after reading to avoid TOCTOU between stat and read.
    if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {} byte limit",
                content.len(),
                MAX_CONFIG_FILE_SIZE
            ),
        });
    }

    let config: MockConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;

    validate::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnconfiguredCall;

    #[test]
    fn test_load_file_nonexistent() {
        let result = load_file(Path::new("/nonexistent/shapemock.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[spy]\nunconfigured_call = \"panic\"\n",
        )
        .unwrap();

        assert_eq!(discover(&nested), Some(dir.path().join(CONFIG_FILE_NAME)));

        let config = load_with_override(&nested, None).unwrap();
        assert_eq!(config.spy.unconfigured_call, UnconfiguredCall::Panic);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // A tempdir under /tmp has no shapemock.toml above it.
        if discover(dir.path()).is_none() {
            let config = load_with_override(dir.path(), None).unwrap();
            assert_eq!(config, MockConfig::default());
        }
    }

    #[test]
    fn test_explicit_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[logging]\nlevel = \"info\"\n")
            .unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[logging]\nlevel = \"trace\"\n").unwrap();

        let config = load_with_override(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_explicit_override_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = load_with_override(dir.path(), Some(&missing));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[logging]\nlevel = \"shouty\"\n").unwrap();
        assert!(matches!(
            load_file(&path),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_oversized_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("huge.toml");
        let data = "x = \"".to_owned() + &"a".repeat(1_100_000) + "\"";
        std::fs::write(&file_path, data).unwrap();

        let result = load_file(&file_path);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "Expected ValidationError for oversized config, got: {result:?}"
        );
    }
}
