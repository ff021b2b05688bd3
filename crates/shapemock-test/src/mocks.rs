//! Spy factories for observing mocks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shapemock::{Spy, SpyFactory, UnconfiguredCall};

/// Spy factory that records the name of every spy it creates.
///
/// Clones share the record, so keep one clone and hand the other to the
/// mock builder. Uses `std::sync::Mutex` so it works in sync and async tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    /// Names of created spies, in creation order.
    created: Arc<Mutex<Vec<String>>>,
    /// Policy for the spies handed out.
    policy: UnconfiguredCall,
}

impl RecordingFactory {
    /// Create a recording factory with default spies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unconfigured-call policy of created spies.
    #[must_use]
    pub fn with_policy(mut self, policy: UnconfiguredCall) -> Self {
        self.policy = policy;
        self
    }

    fn record(&self) -> MutexGuard<'_, Vec<String>> {
        self.created.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Names of created spies, in creation order.
    #[must_use]
    pub fn created(&self) -> Vec<String> {
        self.record().clone()
    }

    /// Number of spies created.
    #[must_use]
    pub fn count(&self) -> usize {
        self.record().len()
    }

    /// Forget the recorded names.
    pub fn clear(&self) {
        self.record().clear();
    }
}

impl SpyFactory for RecordingFactory {
    fn create(&self, name: &str) -> Spy {
        self.record().push(name.to_owned());
        Spy::with_policy(name, self.policy)
    }
}
