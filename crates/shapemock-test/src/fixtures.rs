//! Test fixtures for common shapes and configs.

use shapemock::Shape;
use shapemock_config::{MockConfig, UnconfiguredCall};

/// A service-like shape with two methods and one property.
#[must_use]
pub fn service_shape() -> Shape {
    Shape::new("Service")
        .method("do_something")
        .method("get_value")
        .property("endpoint")
}

/// A shape that declares only properties.
#[must_use]
pub fn data_shape() -> Shape {
    Shape::new("Record").property("id").property("label")
}

/// Default configuration.
#[must_use]
pub fn test_config() -> MockConfig {
    MockConfig::default()
}

/// Configuration whose spies panic when called unconfigured.
#[must_use]
pub fn strict_config() -> MockConfig {
    MockConfig::default().with_unconfigured_call(UnconfiguredCall::Panic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        assert_eq!(service_shape().methods().count(), 2);
        assert_eq!(data_shape().methods().count(), 0);
    }

    #[test]
    fn test_fixture_configs() {
        assert_eq!(
            strict_config().spy.unconfigured_call,
            UnconfiguredCall::Panic
        );
        assert_eq!(test_config(), MockConfig::default());
    }
}
