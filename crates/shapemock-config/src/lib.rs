#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Configuration for shapemock test doubles.
//!
//! # Usage
//!
//! ```rust,no_run
//! use shapemock_config::MockConfig;
//!
//! let config = MockConfig::load(std::path::Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap();
//! println!("log filter: {}", config.logging.filter());
//! ```
//!
//! # Example file
//!
//! ```toml
//! # shapemock.toml
//! [spy]
//! unconfigured_call = "panic"   # or "undefined" (default)
//!
//! [logging]
//! level = "warn"
//! directives = ["shapemock=debug"]
//! ```
//!
//! This crate has no dependencies on other shapemock crates.

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::*;

impl MockConfig {
    /// Load the configuration that applies to `start_dir`.
    ///
    /// See [`loader::load`] for the lookup order.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected file is malformed or fails
    /// validation.
    pub fn load(start_dir: &std::path::Path) -> ConfigResult<Self> {
        loader::load(start_dir)
    }

    /// Load a config from an explicit file path (no discovery).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
