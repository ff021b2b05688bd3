//! Prelude module - commonly used types for convenient import.
//!
//! Use `use shapemock::prelude::*;` to import all essential types.

// Constructors
pub use crate::{mock_class, mock_class_with, mock_interface, mock_interface_with};

// Mocks
pub use crate::{Mock, MockBuilder, Mocked, Overrides};

// Spies and values
pub use crate::{IntoArgs, Promise, Spy, Value};

// Shapes
pub use crate::{Mockable, Shape};

// Errors
pub use crate::{MockError, MockResult};
