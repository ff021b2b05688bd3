//! Plain callables for overrides and spy implementations.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

type Callback = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// A callable that does not record its calls.
///
/// Used for function overrides (`Overrides::with_fn`) and as the body of a
/// spy's implementation. `Err` is a thrown value.
#[derive(Clone)]
pub struct Function {
    callback: Arc<Callback>,
}

impl Function {
    /// Wrap an infallible closure.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        Self {
            callback: Arc::new(move |args: &[Value]| -> Result<Value, Value> {
                Ok(f(args).into())
            }),
        }
    }

    /// Wrap a closure that may throw.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    /// Invoke with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns the thrown value if the closure throws.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, Value> {
        (self.callback)(args)
    }

    /// Whether both handles refer to the same closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function(..)")
    }
}
