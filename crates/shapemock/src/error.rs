//! Error types for mock access.

use shapemock_config::ConfigError;
use thiserror::Error;

use crate::value::Value;

/// Errors raised by the typed accessors on mocks, spies and values.
///
/// Plain reads and writes on a [`Mock`](crate::Mock) never fail; these only
/// surface when a caller asks for something the resolved value cannot be.
#[derive(Debug, Error)]
pub enum MockError {
    /// The resolved member cannot be invoked.
    #[error("member '{name}' is not callable (found {kind})")]
    NotCallable {
        /// Member name that was invoked.
        name: String,
        /// Kind of the value found instead.
        kind: &'static str,
    },

    /// A spy or function was configured to throw.
    #[error("'{name}' threw {value:?}")]
    Thrown {
        /// Name of the spy or member that threw.
        name: String,
        /// The thrown value.
        value: Value,
    },

    /// A value could not be converted to the requested type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Requested kind.
        expected: &'static str,
        /// Actual kind.
        found: &'static str,
    },

    /// Override input was not a key/value structure.
    #[error("invalid overrides: {0}")]
    InvalidOverrides(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MockError {
    /// The thrown value, if this error came from a throwing spy.
    #[must_use]
    pub fn thrown(&self) -> Option<&Value> {
        match self {
            Self::Thrown { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Result type for mock operations.
pub type MockResult<T> = Result<T, MockError>;
