//! Dynamic values carried by mocks, spy arguments and spy results.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::{MockError, MockResult};
use crate::function::Function;
use crate::mock::{Mock, THEN_PROBE};
use crate::promise::Promise;
use crate::spy::Spy;

/// `-2^63`, exactly `i64::MIN`.
#[allow(clippy::cast_precision_loss)]
const I64_LOWER: f64 = i64::MIN as f64;
/// `2^63`, one past `i64::MAX`: the cast rounds up.
#[allow(clippy::cast_precision_loss)]
const I64_UPPER: f64 = i64::MAX as f64;

/// Name used in errors when a value is invoked directly.
const UNNAMED_CALLEE: &str = "<value>";

/// A dynamically typed value.
///
/// Data variants compare structurally. Handle variants ([`Spy`],
/// [`Function`], [`Mock`], [`Promise`] and opaque payloads) compare by
/// identity, so two reads of the same materialized member are equal while
/// two distinct spies never are.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Ordered list.
    List(Vec<Value>),
    /// Plain record; returned as-is when used as a nested override.
    Record(BTreeMap<String, Value>),
    /// Call-recording spy function.
    Spy(Spy),
    /// Plain callable.
    Function(Function),
    /// Nested mock object.
    Mock(Mock),
    /// Deferred result.
    Promise(Promise),
    /// Any other Rust value, shared by reference.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary Rust value.
    #[must_use]
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Build a record from key/value pairs.
    #[must_use]
    pub fn record<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Record(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Spy(_) => "spy",
            Self::Function(_) => "function",
            Self::Mock(_) => "mock",
            Self::Promise(_) => "promise",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Whether this is [`Value::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Whether the value can be invoked.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Spy(_) | Self::Function(_))
    }

    /// Boolean content.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer content. Floats convert only when the conversion is exact.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && (I64_LOWER..I64_UPPER).contains(f) => {
                Some(*f as i64)
            },
            _ => None,
        }
    }

    /// Numeric content as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String content.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// List content.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Record content.
    #[must_use]
    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Record(map) => Some(map),
            _ => None,
        }
    }

    /// The spy, if this is one.
    #[must_use]
    pub fn as_spy(&self) -> Option<&Spy> {
        match self {
            Self::Spy(spy) => Some(spy),
            _ => None,
        }
    }

    /// The mock, if this is one.
    #[must_use]
    pub fn as_mock(&self) -> Option<&Mock> {
        match self {
            Self::Mock(mock) => Some(mock),
            _ => None,
        }
    }

    /// The promise, if this is one.
    #[must_use]
    pub fn as_promise(&self) -> Option<&Promise> {
        match self {
            Self::Promise(promise) => Some(promise),
            _ => None,
        }
    }

    /// Borrow an opaque payload as `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Opaque(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Read a member: record fields, or a property read on a mock.
    ///
    /// Anything else, and missing record keys, yield [`Value::Undefined`].
    #[must_use]
    pub fn member(&self, name: &str) -> Value {
        match self {
            Self::Record(map) => map.get(name).cloned().unwrap_or_default(),
            Self::Mock(mock) => mock.get(name),
            _ => Self::Undefined,
        }
    }

    /// Invoke the value with `args`.
    ///
    /// # Errors
    ///
    /// [`MockError::NotCallable`] for non-callable values and
    /// [`MockError::Thrown`] when the callee throws. A spy reports its own
    /// name; other values are reported as `<value>`.
    pub fn call(&self, args: impl crate::IntoArgs) -> MockResult<Value> {
        self.call_named(UNNAMED_CALLEE, args.into_args())
    }

    pub(crate) fn call_named(&self, name: &str, args: Vec<Value>) -> MockResult<Value> {
        match self {
            Self::Spy(spy) => spy.try_call(args),
            Self::Function(function) => {
                function
                    .invoke(&args)
                    .map_err(|value| MockError::Thrown {
                        name: name.to_owned(),
                        value,
                    })
            },
            other => Err(MockError::NotCallable {
                name: name.to_owned(),
                kind: other.kind(),
            }),
        }
    }

    /// Await the value the way an `await` expression would.
    ///
    /// Promises settle to their outcome. A mock is probed for a `then`
    /// member; a plain mock never materializes one, so it settles to
    /// itself. A callable `then` that was written onto the mock is invoked
    /// and its result settled in turn. Every other value settles to itself.
    pub fn settle(self) -> BoxFuture<'static, Result<Value, Value>> {
        async move {
            match self {
                Self::Promise(promise) => promise.await,
                Self::Mock(mock) => {
                    let then = mock.get(THEN_PROBE);
                    if then.is_callable() {
                        match then.call_named(THEN_PROBE, Vec::new()) {
                            Ok(next) => next.settle().await,
                            Err(MockError::Thrown { value, .. }) => Err(value),
                            Err(_) => Ok(Self::Mock(mock)),
                        }
                    } else {
                        Ok(Self::Mock(mock))
                    }
                },
                other => Ok(other),
            }
        }
        .boxed()
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                Self::Float(*b).as_i64() == Some(*a)
            },
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Spy(a), Self::Spy(b)) => a.ptr_eq(b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Mock(a), Self::Mock(b)) => a.ptr_eq(b),
            (Self::Promise(a), Self::Promise(b)) => a.ptr_eq(b),
            (Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => f.debug_list().entries(items).finish(),
            Self::Record(map) => f.debug_map().entries(map).finish(),
            Self::Spy(spy) => spy.fmt(f),
            Self::Function(function) => function.fmt(f),
            Self::Mock(mock) => mock.fmt(f),
            Self::Promise(promise) => promise.fmt(f),
            Self::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions into Value
// ---------------------------------------------------------------------------

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Self::Int(i64::from(i))
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Record(map)
    }
}

impl From<Spy> for Value {
    fn from(spy: Spy) -> Self {
        Self::Spy(spy)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Mock> for Value {
    fn from(mock: Mock) -> Self {
        Self::Mock(mock)
    }
}

impl From<Promise> for Value {
    fn from(promise: Promise) -> Self {
        Self::Promise(promise)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            },
            serde_json::Value::Object(map) => {
                Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions out of Value
// ---------------------------------------------------------------------------

fn mismatch(expected: &'static str, found: &Value) -> MockError {
    MockError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

impl TryFrom<Value> for bool {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", &value))
    }
}

impl TryFrom<Value> for i64 {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        value.as_i64().ok_or_else(|| mismatch("int", &value))
    }
}

impl TryFrom<Value> for f64 {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        value.as_f64().ok_or_else(|| mismatch("float", &value))
    }
}

impl TryFrom<Value> for String {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl TryFrom<Value> for Spy {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        match value {
            Value::Spy(spy) => Ok(spy),
            other => Err(mismatch("spy", &other)),
        }
    }
}

impl TryFrom<Value> for Mock {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        match value {
            Value::Mock(mock) => Ok(mock),
            other => Err(mismatch("mock", &other)),
        }
    }
}

impl TryFrom<Value> for Promise {
    type Error = MockError;

    fn try_from(value: Value) -> MockResult<Self> {
        match value {
            Value::Promise(promise) => Ok(promise),
            other => Err(mismatch("promise", &other)),
        }
    }
}
