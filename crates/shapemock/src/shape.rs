//! Runtime descriptors of the types being mocked.
//!
//! Rust cannot enumerate a trait's or struct's members at runtime, so the
//! member list is declared once, either by hand or with [`mockable!`]:
//!
//! ```rust
//! use shapemock::{Mockable, MemberKind};
//!
//! trait Service {
//!     fn fetch(&self) -> i64;
//! }
//!
//! shapemock::mockable!(dyn Service { method fetch, method save, property endpoint });
//!
//! let shape = <dyn Service as Mockable>::shape();
//! assert_eq!(shape.name(), "Service");
//! assert!(shape.is_callable("fetch"));
//! assert_eq!(shape.member("endpoint").map(|m| m.kind), Some(MemberKind::Property));
//! ```
//!
//! [`mockable!`]: crate::mockable

/// Whether a member is invoked or read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Callable member; class mocks install a spy for it.
    Method,
    /// Data member.
    Property,
}

/// A declared member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name.
    pub name: String,
    /// Member kind.
    pub kind: MemberKind,
}

/// Ordered member list of a mockable type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: String,
    members: Vec<Member>,
}

impl Shape {
    /// Empty shape. A leading `dyn ` is dropped from the name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name
            .strip_prefix("dyn ")
            .map_or_else(|| name.clone(), str::to_owned);
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Declare a method. Redeclaring a name replaces its kind in place.
    #[must_use]
    pub fn method(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), MemberKind::Method)
    }

    /// Declare a property. Redeclaring a name replaces its kind in place.
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), MemberKind::Property)
    }

    fn declare(mut self, name: String, kind: MemberKind) -> Self {
        if let Some(existing) = self.members.iter_mut().find(|m| m.name == name) {
            existing.kind = kind;
        } else {
            self.members.push(Member { name, kind });
        }
        self
    }

    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Look up a member.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Whether `name` is a declared method.
    #[must_use]
    pub fn is_callable(&self, name: &str) -> bool {
        self.member(name)
            .is_some_and(|m| m.kind == MemberKind::Method)
    }

    /// Declared method names in order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.of_kind(MemberKind::Method)
    }

    /// Declared property names in order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.of_kind(MemberKind::Property)
    }

    fn of_kind(&self, kind: MemberKind) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(move |m| m.kind == kind)
            .map(|m| m.name.as_str())
    }

    /// Number of declared members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no members are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Types with a declared [`Shape`], usable with
/// [`mock_class`](crate::mock_class).
pub trait Mockable {
    /// The member list of the type.
    fn shape() -> Shape;
}

/// Implement [`Mockable`] for a type from a member list.
///
/// Each entry is `method name` or `property name`.
#[macro_export]
macro_rules! mockable {
    ($target:ty { $($kind:ident $member:ident),* $(,)? }) => {
        impl $crate::Mockable for $target {
            fn shape() -> $crate::Shape {
                $crate::Shape::new(stringify!($target))
                    $(.$kind(stringify!($member)))*
            }
        }
    };
}
