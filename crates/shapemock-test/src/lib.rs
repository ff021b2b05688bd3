//! Shapemock Test - shared test utilities for shapemock.
//!
//! This crate provides logging setup, an observing spy factory and fixture
//! shapes that can be used across test crates as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! shapemock-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use shapemock::MockBuilder;
//! use shapemock_test::{RecordingFactory, setup_test_logging};
//!
//! #[test]
//! fn touches_only_fetch() {
//!     setup_test_logging("shapemock=debug");
//!     let factory = RecordingFactory::new();
//!     let mock = MockBuilder::new().factory(factory.clone()).build();
//!
//!     mock.call("fetch", ()).unwrap();
//!     assert_eq!(factory.created(), vec!["mock.fetch"]);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
