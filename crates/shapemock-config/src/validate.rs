//! Configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::MockConfig;

/// Validate a deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &MockConfig) -> ConfigResult<()> {
    validate_logging(config)?;
    Ok(())
}

fn validate_logging(config: &MockConfig) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    for directive in &config.logging.directives {
        let malformed = directive.trim().is_empty()
            || directive.contains(',')
            || directive.chars().any(char::is_whitespace);
        if malformed {
            return Err(ConfigError::ValidationError {
                field: "logging.directives".to_owned(),
                message: format!("malformed directive '{directive}'"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&MockConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_level() {
        let config = MockConfig::default().with_log_level("loud");
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_malformed_directive() {
        let mut config = MockConfig::default();
        config.logging.directives.push("a=debug,b=trace".to_owned());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError { field, .. }) if field == "logging.directives"
        ));

        config.logging.directives = vec![String::new()];
        assert!(validate(&config).is_err());
    }
}
