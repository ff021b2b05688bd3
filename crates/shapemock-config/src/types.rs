//! Configuration types for shapemock.
//!
//! Every struct implements [`Default`] so that an empty file, or a bare
//! `[section]` header, produces the behavior tests get without any config.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level MockConfig
// ---------------------------------------------------------------------------

/// Root configuration for mocks created in a test suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Behavior of freshly materialized spy functions.
    pub spy: SpySection,
    /// Tracing filter used by the test logging helpers.
    pub logging: LoggingSection,
}

impl MockConfig {
    /// Parse a config from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`](crate::ConfigError::ParseError) for
    /// malformed TOML and a validation error for out-of-range values.
    pub fn from_toml_str(content: &str) -> crate::ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::ConfigError::ParseError {
                path: "<inline>".to_owned(),
                source: e,
            })?;
        crate::validate::validate(&config)?;
        Ok(config)
    }

    /// Set the unconfigured-call policy.
    #[must_use]
    pub fn with_unconfigured_call(mut self, policy: UnconfiguredCall) -> Self {
        self.spy.unconfigured_call = policy;
        self
    }

    /// Set the global log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }
}

// ---------------------------------------------------------------------------
// SpySection
// ---------------------------------------------------------------------------

/// What a spy does when it is called with no behavior configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnconfiguredCall {
    /// Record the call and return `undefined`.
    #[default]
    Undefined,
    /// Record the call, then panic naming the spy.
    Panic,
}

/// Spy function settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpySection {
    /// Policy applied to calls on spies without a configured response.
    pub unconfigured_call: UnconfiguredCall,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration for test runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Per-target tracing directives (e.g. `["shapemock=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            directives: Vec::new(),
        }
    }
}

impl LoggingSection {
    /// Render the level and directives as a single `EnvFilter` string.
    #[must_use]
    pub fn filter(&self) -> String {
        std::iter::once(self.level.as_str())
            .chain(self.directives.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",")
    }
}
