//! Mock objects with lazily materialized members.
//!
//! A [`Mock`] answers every property read with a usable value. Reads resolve
//! in this order:
//!
//! 1. a value written with [`Mock::set`];
//! 2. the override supplied at construction, returned as-is;
//! 3. a spy materialized by an earlier read;
//! 4. `then` yields [`Value::Undefined`] without materializing, so a mock
//!    is never mistaken for an awaitable;
//! 5. a new spy from the mock's [`SpyFactory`], stored for later reads.
//!
//! Class mocks (see [`Mock::class`]) skip step 5: unknown names are
//! undefined.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shapemock_config::MockConfig;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::IntoArgs;
use crate::error::{MockError, MockResult};
use crate::factory::{DefaultSpyFactory, SpyFactory};
use crate::overrides::Overrides;
use crate::shape::Shape;
use crate::spy::Spy;
use crate::value::Value;

/// Member name probed by await machinery; never materialized.
pub const THEN_PROBE: &str = "then";

/// Label used for spy names when a mock has no shape.
const DEFAULT_LABEL: &str = "mock";

/// Unique identifier of a mock instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MockId(Uuid);

impl MockId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a stored member got into the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOrigin {
    /// Created on first read, or installed by a class mock.
    Materialized,
    /// Written by the caller; supersedes overrides.
    Assigned,
}

/// Whether unseen names are materialized on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Materialization {
    /// Materialize a spy for every unseen name (interface mocks).
    #[default]
    Lazy,
    /// Unseen names read as undefined (class mocks).
    Never,
}

#[derive(Clone)]
struct Slot {
    value: Value,
    origin: SlotOrigin,
}

struct MockInner {
    id: MockId,
    label: String,
    shape: Option<Shape>,
    overrides: Overrides,
    materialization: Materialization,
    factory: Arc<dyn SpyFactory>,
    slots: Mutex<BTreeMap<String, Slot>>,
}

/// A dynamically extensible mock object.
///
/// Cloning yields another handle to the same backing store.
///
/// ```rust
/// use shapemock::{Mock, Overrides, Value};
///
/// let mock = Mock::interface(Overrides::new().with("prop", 7));
/// assert_eq!(mock.get("prop"), Value::Int(7));
///
/// mock.spy("fn").returns(5);
/// assert_eq!(mock.call("fn", ()).unwrap(), Value::Int(5));
/// assert_eq!(mock.spy("fn").call_count(), 1);
/// ```
#[derive(Clone)]
pub struct Mock {
    inner: Arc<MockInner>,
}

impl Mock {
    /// Interface mock with the given overrides and default spies.
    #[must_use]
    pub fn interface(overrides: Overrides) -> Self {
        MockBuilder::new().overrides(overrides).build()
    }

    /// Start configuring a mock.
    #[must_use]
    pub fn builder() -> MockBuilder {
        MockBuilder::new()
    }

    fn slots(&self) -> MutexGuard<'_, BTreeMap<String, Slot>> {
        self.inner.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}.{name}", self.inner.label)
    }

    /// Read a member. Never fails.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        {
            let slots = self.slots();
            match slots.get(name) {
                Some(slot) if slot.origin == SlotOrigin::Assigned => {
                    trace!(mock = %self.inner.id, member = name, "resolved assigned value");
                    return slot.value.clone();
                },
                _ => {},
            }

            if let Some(value) = self.inner.overrides.get(name) {
                trace!(mock = %self.inner.id, member = name, "resolved override");
                return value.clone();
            }

            if let Some(slot) = slots.get(name) {
                return slot.value.clone();
            }
        }

        if name == THEN_PROBE || self.inner.materialization == Materialization::Never {
            return Value::Undefined;
        }

        // Built outside the lock: the factory is caller code.
        let spy = self.create_spy(name);
        self.store_materialized(name, Value::Spy(spy))
    }

    pub(crate) fn create_spy(&self, name: &str) -> Spy {
        self.inner.factory.create(&self.qualified(name))
    }

    /// Store `value` unless `name` already has a slot; returns the slot value.
    pub(crate) fn store_materialized(&self, name: &str, value: Value) -> Value {
        let mut slots = self.slots();
        let slot = slots.entry(name.to_owned()).or_insert_with(|| {
            debug!(mock = %self.inner.id, member = name, "materialized spy");
            Slot {
                value,
                origin: SlotOrigin::Materialized,
            }
        });
        slot.value.clone()
    }

    /// Write a member. Later reads return `value`, ahead of any override.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        trace!(mock = %self.inner.id, member = %name, "assigned value");
        self.slots().insert(
            name,
            Slot {
                value: value.into(),
                origin: SlotOrigin::Assigned,
            },
        );
    }

    /// Forget the stored value for `name`; the next read resolves afresh.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.slots().remove(name).map(|slot| slot.value)
    }

    /// Read `name` and invoke it.
    ///
    /// # Errors
    ///
    /// [`MockError::NotCallable`] if the member is not callable and
    /// [`MockError::Thrown`] if it throws.
    pub fn call(&self, name: &str, args: impl IntoArgs) -> MockResult<Value> {
        self.get(name).call_named(name, args.into_args())
    }

    /// Read `name` as a spy.
    ///
    /// # Errors
    ///
    /// [`MockError::NotCallable`] if the member resolves to anything other
    /// than a spy (an override, a written value, or undefined).
    pub fn try_spy(&self, name: &str) -> MockResult<Spy> {
        match self.get(name) {
            Value::Spy(spy) => Ok(spy),
            other => Err(MockError::NotCallable {
                name: name.to_owned(),
                kind: other.kind(),
            }),
        }
    }

    /// Read `name` as a spy, materializing it if needed.
    ///
    /// # Panics
    ///
    /// Panics if the member resolves to something other than a spy.
    #[must_use]
    pub fn spy(&self, name: &str) -> Spy {
        match self.try_spy(name) {
            Ok(spy) => spy,
            Err(err) => panic!("{err}"),
        }
    }

    /// Whether `name` currently resolves without materializing.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.overrides.contains(name) || self.slots().contains_key(name)
    }

    /// Origin of the stored value for `name`, if any.
    #[must_use]
    pub fn slot_origin(&self, name: &str) -> Option<SlotOrigin> {
        self.slots().get(name).map(|slot| slot.origin)
    }

    /// Whether a spy was materialized (or installed) for `name`.
    #[must_use]
    pub fn is_materialized(&self, name: &str) -> bool {
        self.slot_origin(name) == Some(SlotOrigin::Materialized)
    }

    /// Every name that resolves without materializing, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let slots = self.slots();
        self.inner
            .overrides
            .iter()
            .map(|(name, _)| name)
            .chain(slots.keys().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Overrides supplied at construction.
    #[must_use]
    pub fn overrides(&self) -> &Overrides {
        &self.inner.overrides
    }

    /// Declared shape, if the mock was built from one.
    #[must_use]
    pub fn shape(&self) -> Option<&Shape> {
        self.inner.shape.as_ref()
    }

    /// Label used to name this mock's spies.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Materialization policy.
    #[must_use]
    pub fn materialization(&self) -> Materialization {
        self.inner.materialization
    }

    /// Instance identifier.
    #[must_use]
    pub fn id(&self) -> MockId {
        self.inner.id
    }

    /// Whether both handles refer to the same mock.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}

/// Configures and builds a [`Mock`].
pub struct MockBuilder {
    label: Option<String>,
    shape: Option<Shape>,
    overrides: Overrides,
    materialization: Materialization,
    factory: Arc<dyn SpyFactory>,
}

impl MockBuilder {
    /// Interface-mock defaults: lazy materialization, default spies.
    #[must_use]
    pub fn new() -> Self {
        Self {
            label: None,
            shape: None,
            overrides: Overrides::new(),
            materialization: Materialization::Lazy,
            factory: Arc::new(DefaultSpyFactory::new()),
        }
    }

    /// Overrides for the mock.
    #[must_use]
    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Spy factory for the mock.
    #[must_use]
    pub fn factory(mut self, factory: impl SpyFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    /// Spy factory shared with other mocks.
    #[must_use]
    pub fn shared_factory(mut self, factory: Arc<dyn SpyFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Use a [`DefaultSpyFactory`] following `config`.
    #[must_use]
    pub fn config(self, config: &MockConfig) -> Self {
        self.factory(DefaultSpyFactory::from_config(config))
    }

    /// Attach a shape; its name becomes the label unless one is set.
    #[must_use]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Label used to name spies (`<label>.<member>`).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Materialization policy.
    #[must_use]
    pub fn materialization(mut self, materialization: Materialization) -> Self {
        self.materialization = materialization;
        self
    }

    pub(crate) fn has_label_source(&self) -> bool {
        self.label.is_some() || self.shape.is_some()
    }

    /// Build the mock.
    #[must_use]
    pub fn build(self) -> Mock {
        let label = self
            .label
            .or_else(|| self.shape.as_ref().map(|s| s.name().to_owned()))
            .unwrap_or_else(|| DEFAULT_LABEL.to_owned());
        let mock = Mock {
            inner: Arc::new(MockInner {
                id: MockId::new(),
                label,
                shape: self.shape,
                overrides: self.overrides,
                materialization: self.materialization,
                factory: self.factory,
                slots: Mutex::new(BTreeMap::new()),
            }),
        };
        debug!(
            mock = %mock.inner.id,
            label = %mock.inner.label,
            overrides = mock.inner.overrides.len(),
            "created mock"
        );
        mock
    }
}

impl Default for MockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockBuilder")
            .field("label", &self.label)
            .field("shape", &self.shape)
            .field("overrides", &self.overrides)
            .field("materialization", &self.materialization)
            .finish_non_exhaustive()
    }
}
