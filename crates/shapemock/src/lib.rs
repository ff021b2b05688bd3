//! Shapemock - lazily materialized mocks for unit tests.
//!
//! This crate provides:
//! - Interface mocks that answer every member read with a spy, created on
//!   first access and memoized
//! - Class mocks with a spy per declared method
//! - Call-recording [`Spy`] functions with configurable responses
//! - Selective overrides, and direct writes that supersede them
//!
//! # Example
//!
//! ```rust
//! use shapemock::prelude::*;
//!
//! trait Repository {
//!     fn count(&self) -> i64;
//! }
//!
//! impl Repository for Mocked<dyn Repository> {
//!     fn count(&self) -> i64 {
//!         self.call("count", ()).ok().and_then(|v| v.as_i64()).unwrap_or_default()
//!     }
//! }
//!
//! let repo = mock_interface::<dyn Repository>();
//! repo.spy("count").returns(5);
//!
//! assert_eq!(repo.count(), 5);
//! assert_eq!(repo.count(), 5);
//! assert_eq!(repo.spy("count").call_count(), 2);
//!
//! // Awaiting a mock never materializes `then`.
//! assert!(repo.get("then").is_undefined());
//! ```
//!
//! Async members resolve through [`Promise`]:
//!
//! ```rust
//! # use shapemock::prelude::*;
//! # async fn demo() {
//! let client = Mock::interface(Overrides::new());
//! client.spy("fetch").resolves(3);
//!
//! let result = client.call("fetch", ()).unwrap().settle().await;
//! assert_eq!(result, Ok(Value::Int(3)));
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod args;
mod class;
mod error;
mod factory;
mod function;
mod mock;
mod mocked;
mod overrides;
mod promise;
mod shape;
mod spy;
mod value;

pub use args::IntoArgs;
pub use error::{MockError, MockResult};
pub use factory::{DefaultSpyFactory, SpyFactory};
pub use function::Function;
pub use mock::{Materialization, Mock, MockBuilder, MockId, SlotOrigin, THEN_PROBE};
pub use mocked::{Mocked, mock_class, mock_class_with, mock_interface, mock_interface_with};
pub use overrides::Overrides;
pub use promise::{Promise, Settle};
pub use shape::{Member, MemberKind, Mockable, Shape};
pub use shapemock_config::{MockConfig, UnconfiguredCall};
pub use spy::{Outcome, Spy};
pub use value::Value;
