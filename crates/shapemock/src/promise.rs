//! Deferred results returned by async-configured spies.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{BoxFuture, Shared};

use crate::value::Value;

/// A shareable deferred value that settles to `Ok` (resolved) or `Err`
/// (rejected).
///
/// Clones observe the same outcome, and awaiting never consumes it.
#[derive(Clone)]
pub struct Promise {
    inner: Shared<BoxFuture<'static, Result<Value, Value>>>,
}

impl Promise {
    /// An already-resolved promise.
    #[must_use]
    pub fn resolved(value: impl Into<Value>) -> Self {
        Self::settled(Ok(value.into()))
    }

    /// An already-rejected promise.
    #[must_use]
    pub fn rejected(reason: impl Into<Value>) -> Self {
        Self::settled(Err(reason.into()))
    }

    fn settled(outcome: Result<Value, Value>) -> Self {
        Self::from_future(futures::future::ready(outcome))
    }

    /// A pending promise and the handle that settles it.
    ///
    /// If the [`Settle`] handle is dropped unused, the promise stays pending
    /// forever.
    #[must_use]
    pub fn pending() -> (Self, Settle) {
        let (tx, rx) = oneshot::channel();
        let promise = Self::from_future(async move {
            match rx.await {
                Ok(outcome) => outcome,
                Err(oneshot::Canceled) => futures::future::pending().await,
            }
        });
        (promise, Settle { tx })
    }

    /// Adopt an arbitrary future as a promise.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, Value>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// The outcome, if the promise can settle without waiting.
    #[must_use]
    pub fn peek(&self) -> Option<Result<Value, Value>> {
        self.inner.clone().now_or_never()
    }

    /// Whether the promise has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.peek().is_some()
    }

    /// Whether both handles refer to the same promise.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl Future for Promise {
    type Output = Result<Value, Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(Ok(value)) => f.debug_tuple("Promise::Resolved").field(&value).finish(),
            Some(Err(reason)) => f.debug_tuple("Promise::Rejected").field(&reason).finish(),
            None => f.write_str("Promise::Pending"),
        }
    }
}

/// Settles a promise created by [`Promise::pending`].
#[derive(Debug)]
pub struct Settle {
    tx: oneshot::Sender<Result<Value, Value>>,
}

impl Settle {
    /// Resolve the promise. Returns `false` if every promise handle is gone.
    pub fn resolve(self, value: impl Into<Value>) -> bool {
        self.tx.send(Ok(value.into())).is_ok()
    }

    /// Reject the promise. Returns `false` if every promise handle is gone.
    pub fn reject(self, reason: impl Into<Value>) -> bool {
        self.tx.send(Err(reason.into())).is_ok()
    }
}
