//! Class mocks: every declared method replaced by a spy, eagerly.

use tracing::debug;

use crate::mock::{Materialization, Mock, MockBuilder};
use crate::overrides::Overrides;
use crate::shape::Shape;
use crate::value::Value;

impl Mock {
    /// Class mock for `shape` with default spies.
    ///
    /// Every method of the shape gets a spy, in declaration order; then every
    /// entry of `properties` is stored on top, replacing a spy of the same
    /// name. Undeclared names read as undefined.
    #[must_use]
    pub fn class(shape: &Shape, properties: Overrides) -> Self {
        MockBuilder::new().build_class(shape, properties)
    }
}

impl MockBuilder {
    /// Build a class mock, using this builder's factory and label.
    #[must_use]
    pub fn build_class(self, shape: &Shape, properties: Overrides) -> Mock {
        let mock = self
            .shape(shape.clone())
            .materialization(Materialization::Never)
            .build();

        let mut installed = 0_usize;
        for method in shape.methods() {
            mock.install(method);
            installed = installed.saturating_add(1);
        }
        for (name, value) in properties {
            mock.set(name, value);
        }

        debug!(
            mock = %mock.id(),
            class = shape.name(),
            methods = installed,
            "installed class mock"
        );
        mock
    }
}

impl Mock {
    /// Store a fresh spy for `name` as a materialized member.
    fn install(&self, name: &str) {
        let spy = self.create_spy(name);
        self.store_materialized(name, Value::Spy(spy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotOrigin;

    fn service() -> Shape {
        Shape::new("MyService")
            .method("do_something")
            .method("get_value")
            .property("endpoint")
    }

    #[test]
    fn test_methods_become_spies() {
        let mock = Mock::class(&service(), Overrides::new());

        assert!(mock.get("do_something").as_spy().is_some());
        assert!(mock.get("get_value").as_spy().is_some());
        assert!(mock.is_materialized("do_something"));
        assert_eq!(mock.spy("get_value").name(), "MyService.get_value");
    }

    #[test]
    fn test_properties_override_methods() {
        let mock = Mock::class(
            &service(),
            Overrides::new()
                .with_fn("get_value", |_: &[Value]| 100)
                .with("endpoint", "http://localhost"),
        );

        assert_eq!(mock.call("get_value", ()).unwrap(), Value::Int(100));
        assert_eq!(mock.get("endpoint"), Value::from("http://localhost"));
        assert_eq!(mock.slot_origin("get_value"), Some(SlotOrigin::Assigned));
    }

    #[test]
    fn test_no_lazy_materialization() {
        let mock = Mock::class(&service(), Overrides::new());
        assert!(mock.get("endpoint").is_undefined());
        assert!(mock.get("undeclared").is_undefined());
        assert_eq!(mock.names(), vec!["do_something", "get_value"]);
    }

    #[test]
    fn test_shape_without_methods() {
        let mock = Mock::class(&Shape::new("Plain").property("x"), Overrides::new());
        assert!(mock.names().is_empty());
    }

    #[test]
    fn test_spies_are_independent_per_instance() {
        let a = Mock::class(&service(), Overrides::new());
        let b = Mock::class(&service(), Overrides::new());
        a.spy("do_something").call(());
        assert_eq!(b.spy("do_something").call_count(), 0);
    }
}
