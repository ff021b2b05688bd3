//! Argument lists for spy and mock calls.

use crate::value::Value;

/// Converts a call's arguments into a list of [`Value`]s.
///
/// Implemented for `()`, tuples of up to six `Into<Value>` items, arrays,
/// vectors and slices of values.
///
/// ```rust
/// use shapemock::{IntoArgs, Value};
///
/// assert_eq!(().into_args(), Vec::<Value>::new());
/// assert_eq!((1, "two").into_args(), vec![Value::Int(1), Value::from("two")]);
/// ```
pub trait IntoArgs {
    /// Produce the argument list.
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Vec<Value> {
        self
    }
}

impl IntoArgs for &[Value] {
    fn into_args(self) -> Vec<Value> {
        self.to_vec()
    }
}

impl<const N: usize> IntoArgs for [Value; N] {
    fn into_args(self) -> Vec<Value> {
        self.into()
    }
}

macro_rules! tuple_args {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
tuple_args!(A, B, C, D, E);
tuple_args!(A, B, C, D, E, F);
