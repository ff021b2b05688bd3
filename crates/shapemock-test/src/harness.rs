//! Test harness helpers.

use shapemock_config::MockConfig;
use tracing_subscriber::EnvFilter;

/// Set up test logging with the given filter.
///
/// Initializes the tracing subscriber with the test writer so output is
/// captured per test. Later calls are no-ops.
///
/// # Example
///
/// ```rust,ignore
/// use shapemock_test::setup_test_logging;
///
/// #[test]
/// fn my_test() {
///     setup_test_logging("shapemock=trace");
///     // ... test code
/// }
/// ```
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging with default filter (warn level).
pub fn setup_test_logging_default() {
    setup_test_logging("warn");
}

/// Set up test logging from the `[logging]` section of a config.
pub fn setup_test_logging_from(config: &MockConfig) {
    setup_test_logging(&config.logging.filter());
}
