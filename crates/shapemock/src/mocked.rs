//! Typed mock handles and the top-level constructors.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

use crate::mock::{Mock, MockBuilder};
use crate::overrides::Overrides;
use crate::shape::{Member, Mockable};
use crate::value::Value;

/// A [`Mock`] tagged with the type it stands in for.
///
/// `T` is only a compile-time tag (usually `dyn Trait`); every operation of
/// [`Mock`] is available through `Deref`. Implement your own traits for
/// `Mocked<dyn Trait>` to hand the mock to code under test:
///
/// ```rust
/// use shapemock::{Mocked, mock_interface};
///
/// trait Clock {
///     fn now(&self) -> i64;
/// }
///
/// impl Clock for Mocked<dyn Clock> {
///     fn now(&self) -> i64 {
///         self.call("now", ()).ok().and_then(|v| v.as_i64()).unwrap_or_default()
///     }
/// }
///
/// let clock = mock_interface::<dyn Clock>();
/// clock.spy("now").returns(1_700_000_000);
/// assert_eq!(clock.now(), 1_700_000_000);
/// ```
pub struct Mocked<T: ?Sized> {
    mock: Mock,
    _target: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Mocked<T> {
    /// Tag an existing mock.
    #[must_use]
    pub fn from_mock(mock: Mock) -> Self {
        Self {
            mock,
            _target: PhantomData,
        }
    }

    /// Drop the type tag.
    #[must_use]
    pub fn into_mock(self) -> Mock {
        self.mock
    }

    /// Borrow the untyped mock.
    #[must_use]
    pub fn as_mock(&self) -> &Mock {
        &self.mock
    }
}

impl<T: Mockable + ?Sized> Mocked<T> {
    /// Every declared member of `T` paired with its current value.
    ///
    /// Reading goes through [`Mock::get`], so on an interface mock this
    /// materializes spies for members that were not yet touched.
    #[must_use]
    pub fn declared(&self) -> Vec<(Member, Value)> {
        T::shape()
            .members()
            .iter()
            .map(|member| (member.clone(), self.mock.get(&member.name)))
            .collect()
    }
}

impl<T: ?Sized> Deref for Mocked<T> {
    type Target = Mock;

    fn deref(&self) -> &Mock {
        &self.mock
    }
}

impl<T: ?Sized> Clone for Mocked<T> {
    fn clone(&self) -> Self {
        Self::from_mock(self.mock.clone())
    }
}

impl<T: ?Sized> fmt::Debug for Mocked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mocked").field(&self.mock).finish()
    }
}

impl<T: ?Sized> From<Mocked<T>> for Value {
    fn from(mocked: Mocked<T>) -> Self {
        Value::Mock(mocked.mock)
    }
}

impl<T: ?Sized> From<Mocked<T>> for Mock {
    fn from(mocked: Mocked<T>) -> Self {
        mocked.mock
    }
}

/// Short label for `T`: the last path segment, without `dyn `.
fn label_of<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let base = full.strip_prefix("dyn ").unwrap_or(full);
    let base = base.split(['<', ' ']).next().unwrap_or(base);
    base.rsplit("::").next().unwrap_or(base).to_owned()
}

impl MockBuilder {
    /// Build an interface mock tagged with `T`, labelled after `T` unless a
    /// label was set.
    #[must_use]
    pub fn build_interface<T: ?Sized>(self) -> Mocked<T> {
        let builder = if self.has_label_source() {
            self
        } else {
            self.label(label_of::<T>())
        };
        Mocked::from_mock(builder.build())
    }

    /// Build a class mock for `T`'s shape.
    #[must_use]
    pub fn build_class_of<T: Mockable + ?Sized>(self, properties: Overrides) -> Mocked<T> {
        Mocked::from_mock(self.build_class(&T::shape(), properties))
    }
}

/// Interface mock for `T` with no overrides.
#[must_use]
pub fn mock_interface<T: ?Sized>() -> Mocked<T> {
    mock_interface_with::<T>(Overrides::new())
}

/// Interface mock for `T` with the given overrides.
#[must_use]
pub fn mock_interface_with<T: ?Sized>(overrides: Overrides) -> Mocked<T> {
    MockBuilder::new().overrides(overrides).build_interface::<T>()
}

/// Class mock for `T`: a spy per declared method.
#[must_use]
pub fn mock_class<T: Mockable + ?Sized>() -> Mocked<T> {
    mock_class_with::<T>(Overrides::new())
}

/// Class mock for `T` with property values merged over the spies.
#[must_use]
pub fn mock_class_with<T: Mockable + ?Sized>(properties: Overrides) -> Mocked<T> {
    MockBuilder::new().build_class_of::<T>(properties)
}
