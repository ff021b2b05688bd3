//! Caller-supplied values that preempt lazy materialization.

use std::collections::BTreeMap;

use crate::error::{MockError, MockResult};
use crate::function::Function;
use crate::value::Value;

/// Partial, possibly nested, member values supplied when a mock is built.
///
/// Nested structures are stored as [`Value::Record`] (or as nested mocks)
/// and handed back exactly as given; no interception applies to them.
///
/// ```rust
/// use shapemock::{Overrides, Value};
///
/// let overrides = Overrides::new()
///     .with("prop", 7)
///     .with_fn("fn", |_: &[Value]| 5)
///     .with_nested("settings", Overrides::new().with("retries", 3));
///
/// assert_eq!(overrides.get("prop"), Some(&Value::Int(7)));
/// assert_eq!(overrides.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    entries: BTreeMap<String, Value>,
}

impl Overrides {
    /// Empty override set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value for `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a plain function for `name`.
    #[must_use]
    pub fn with_fn<F, R>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.with(name, Function::new(f))
    }

    /// Add a nested structure for `name`, stored as a record.
    #[must_use]
    pub fn with_nested(self, name: impl Into<String>, nested: Overrides) -> Self {
        self.with(name, Value::Record(nested.entries))
    }

    /// Insert or replace the value for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Value supplied for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Whether `name` is overridden.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of overridden names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overridden names and values, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Overrides {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl TryFrom<serde_json::Value> for Overrides {
    type Error = MockError;

    /// Build overrides from a JSON object; nested objects become records.
    fn try_from(json: serde_json::Value) -> MockResult<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(MockError::InvalidOverrides(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}
