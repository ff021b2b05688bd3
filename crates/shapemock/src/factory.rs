//! Spy creation, abstracted so mocks never build spies themselves.

use shapemock_config::{MockConfig, UnconfiguredCall};

use crate::spy::Spy;

/// Creates the spies that mocks install or materialize.
///
/// Substitute a factory to pre-configure every spy a mock hands out, or to
/// observe which members the code under test touched.
///
/// ```rust
/// use shapemock::{MockBuilder, Spy, Value};
///
/// let mock = MockBuilder::new()
///     .factory(|name: &str| {
///         let spy = Spy::new(name);
///         spy.returns(0);
///         spy
///     })
///     .build();
///
/// assert_eq!(mock.call("anything", ()).unwrap(), Value::Int(0));
/// ```
pub trait SpyFactory: Send + Sync {
    /// Create a spy for the member `name` (already qualified with the
    /// mock's label, e.g. `Service.fetch`).
    fn create(&self, name: &str) -> Spy;
}

impl<F> SpyFactory for F
where
    F: Fn(&str) -> Spy + Send + Sync,
{
    fn create(&self, name: &str) -> Spy {
        self(name)
    }
}

/// Factory producing plain spies with a fixed unconfigured-call policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultSpyFactory {
    unconfigured: UnconfiguredCall,
}

impl DefaultSpyFactory {
    /// Factory whose spies return `undefined` until configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with an explicit unconfigured-call policy.
    #[must_use]
    pub fn with_policy(unconfigured: UnconfiguredCall) -> Self {
        Self { unconfigured }
    }

    /// Factory following the `[spy]` section of a config.
    #[must_use]
    pub fn from_config(config: &MockConfig) -> Self {
        Self::with_policy(config.spy.unconfigured_call)
    }
}

impl SpyFactory for DefaultSpyFactory {
    fn create(&self, name: &str) -> Spy {
        Spy::with_policy(name, self.unconfigured)
    }
}
