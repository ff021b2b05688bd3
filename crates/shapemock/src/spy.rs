//! Call-recording spy functions.
//!
//! A [`Spy`] records the arguments of every call and answers with a
//! configured behavior. One-shot behaviors queue up and are consumed first,
//! in the order they were added; after that the persistent behavior applies.
//! With neither configured, the spy's [`UnconfiguredCall`] policy decides.
//!
//! ```rust
//! use shapemock::{Spy, Value};
//!
//! let spy = Spy::new("fetch");
//! spy.returns(5).returns_once(1);
//!
//! assert_eq!(spy.call(()), Value::Int(1));
//! assert_eq!(spy.call(()), Value::Int(5));
//! assert_eq!(spy.call_count(), 2);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shapemock_config::UnconfiguredCall;
use tracing::trace;

use crate::IntoArgs;
use crate::error::{MockError, MockResult};
use crate::function::Function;
use crate::promise::Promise;
use crate::value::Value;

/// Recorded result of one spy call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call returned a value.
    Returned(Value),
    /// The call threw a value.
    Threw(Value),
}

#[derive(Clone)]
enum Behavior {
    Return(Value),
    Throw(Value),
    Resolve(Value),
    Reject(Value),
    Implementation(Function),
}

impl Behavior {
    fn run(self, args: &[Value]) -> Result<Value, Value> {
        match self {
            Self::Return(value) => Ok(value),
            Self::Throw(value) => Err(value),
            Self::Resolve(value) => Ok(Value::Promise(Promise::resolved(value))),
            Self::Reject(reason) => Ok(Value::Promise(Promise::rejected(reason))),
            Self::Implementation(function) => function.invoke(args),
        }
    }
}

struct SpyState {
    name: String,
    calls: Vec<Vec<Value>>,
    outcomes: Vec<Outcome>,
    persistent: Option<Behavior>,
    once: VecDeque<Behavior>,
    unconfigured: UnconfiguredCall,
}

/// A callable stand-in that records invocations.
///
/// Cloning yields another handle to the same spy; identity is stable for
/// the lifetime of the spy.
#[derive(Clone)]
pub struct Spy {
    state: Arc<Mutex<SpyState>>,
}

impl Spy {
    /// Create a spy that returns `undefined` until configured.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_policy(name, UnconfiguredCall::default())
    }

    /// Create a spy with an explicit unconfigured-call policy.
    #[must_use]
    pub fn with_policy(name: impl Into<String>, unconfigured: UnconfiguredCall) -> Self {
        Self {
            state: Arc::new(Mutex::new(SpyState {
                name: name.into(),
                calls: Vec::new(),
                outcomes: Vec::new(),
                persistent: None,
                once: VecDeque::new(),
                unconfigured,
            })),
        }
    }

    /// Create a spy that falls back to a real implementation.
    #[must_use]
    pub fn from_fn<F, R>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        let spy = Self::new(name);
        spy.implementation(f);
        spy
    }

    fn lock(&self) -> MutexGuard<'_, SpyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_persistent(&self, behavior: Behavior) -> &Self {
        self.lock().persistent = Some(behavior);
        self
    }

    fn push_once(&self, behavior: Behavior) -> &Self {
        self.lock().once.push_back(behavior);
        self
    }

    // ---- configuration ----

    /// Rename the spy.
    pub fn named(&self, name: impl Into<String>) -> &Self {
        self.lock().name = name.into();
        self
    }

    /// Always return `value`.
    pub fn returns(&self, value: impl Into<Value>) -> &Self {
        self.set_persistent(Behavior::Return(value.into()))
    }

    /// Return `value` on the next unanswered call only.
    pub fn returns_once(&self, value: impl Into<Value>) -> &Self {
        self.push_once(Behavior::Return(value.into()))
    }

    /// Always throw `value`.
    pub fn throws(&self, value: impl Into<Value>) -> &Self {
        self.set_persistent(Behavior::Throw(value.into()))
    }

    /// Throw `value` on the next unanswered call only.
    pub fn throws_once(&self, value: impl Into<Value>) -> &Self {
        self.push_once(Behavior::Throw(value.into()))
    }

    /// Always return a promise resolving to `value`.
    pub fn resolves(&self, value: impl Into<Value>) -> &Self {
        self.set_persistent(Behavior::Resolve(value.into()))
    }

    /// Return a promise resolving to `value` on the next call only.
    pub fn resolves_once(&self, value: impl Into<Value>) -> &Self {
        self.push_once(Behavior::Resolve(value.into()))
    }

    /// Always return a promise rejecting with `reason`.
    pub fn rejects(&self, reason: impl Into<Value>) -> &Self {
        self.set_persistent(Behavior::Reject(reason.into()))
    }

    /// Return a promise rejecting with `reason` on the next call only.
    pub fn rejects_once(&self, reason: impl Into<Value>) -> &Self {
        self.push_once(Behavior::Reject(reason.into()))
    }

    /// Always delegate to `f`.
    pub fn implementation<F, R>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.set_persistent(Behavior::Implementation(Function::new(f)))
    }

    /// Delegate the next call only to `f`.
    pub fn implementation_once<F, R>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.push_once(Behavior::Implementation(Function::new(f)))
    }

    /// Always delegate to `f`, which may throw by returning `Err`.
    pub fn fallible_implementation<F>(&self, f: F) -> &Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        self.set_persistent(Behavior::Implementation(Function::fallible(f)))
    }

    // ---- invocation ----

    /// Invoke the spy.
    ///
    /// Arguments are recorded before the behavior runs, the outcome after.
    /// No lock is held while an implementation runs, so implementations may
    /// call back into the same spy.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::Thrown`] when the selected behavior throws.
    ///
    /// # Panics
    ///
    /// Panics when no behavior is configured and the spy was created with
    /// [`UnconfiguredCall::Panic`].
    pub fn try_call(&self, args: impl IntoArgs) -> MockResult<Value> {
        let args = args.into_args();
        let (behavior, name, unconfigured) = {
            let mut state = self.lock();
            state.calls.push(args.clone());
            let behavior = state.once.pop_front().or_else(|| state.persistent.clone());
            (behavior, state.name.clone(), state.unconfigured)
        };
        trace!(spy = %name, args = args.len(), configured = behavior.is_some(), "spy invoked");

        let result = match behavior {
            Some(behavior) => behavior.run(&args),
            None => match unconfigured {
                UnconfiguredCall::Undefined => Ok(Value::Undefined),
                UnconfiguredCall::Panic => {
                    panic!("spy '{name}' was called without a configured response")
                },
            },
        };

        self.lock().outcomes.push(match &result {
            Ok(value) => Outcome::Returned(value.clone()),
            Err(value) => Outcome::Threw(value.clone()),
        });

        result.map_err(|value| MockError::Thrown { name, value })
    }

    /// Invoke the spy, treating a throw as a test failure.
    ///
    /// # Panics
    ///
    /// Panics when the selected behavior throws, or when the spy is
    /// unconfigured under [`UnconfiguredCall::Panic`].
    pub fn call(&self, args: impl IntoArgs) -> Value {
        match self.try_call(args) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    // ---- introspection ----

    /// Current name.
    #[must_use]
    pub fn name(&self) -> String {
        self.lock().name.clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Whether the spy was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        !self.lock().calls.is_empty()
    }

    /// Whether any recorded call had exactly these arguments.
    #[must_use]
    pub fn was_called_with(&self, args: impl IntoArgs) -> bool {
        let args = args.into_args();
        self.lock().calls.iter().any(|call| *call == args)
    }

    /// Arguments of every call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.lock().calls.clone()
    }

    /// Arguments of call `n` (zero-based).
    #[must_use]
    pub fn nth_call(&self, n: usize) -> Option<Vec<Value>> {
        self.lock().calls.get(n).cloned()
    }

    /// Arguments of the most recent call.
    #[must_use]
    pub fn last_call(&self) -> Option<Vec<Value>> {
        self.lock().calls.last().cloned()
    }

    /// Outcome of every completed call, oldest first.
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.lock().outcomes.clone()
    }

    /// Policy applied when no behavior is configured.
    #[must_use]
    pub fn unconfigured_policy(&self) -> UnconfiguredCall {
        self.lock().unconfigured
    }

    // ---- reset ----

    /// Forget recorded calls and outcomes, keeping behaviors.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.outcomes.clear();
    }

    /// Forget recorded calls, outcomes and every configured behavior.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.calls.clear();
        state.outcomes.clear();
        state.persistent = None;
        state.once.clear();
    }

    /// Whether both handles refer to the same spy.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for Spy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Spy")
            .field("name", &state.name)
            .field("calls", &state.calls.len())
            .finish_non_exhaustive()
    }
}
