//! Outcome model for find/replace operations.
//!
//! Operations return `Option<Status>`: `None` means the match was found and
//! acted on without caveat. Any `Some` status, even the non-error
//! [`Status::Wrapped`], is worth showing to the user.

use std::fmt;

/// An exceptional outcome of one find/replace operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
	/// No occurrence is reachable under the current scope and options.
	NoMatch,
	/// A match was found only after wrapping past the scope boundary.
	Wrapped,
	/// A match was found but the target refused to be modified.
	ReadOnly,
}

/// Per-variant handlers for a [`Status`].
///
/// Implement this to attach behavior to each outcome; [`Status::accept`] calls
/// exactly the method bound to the status it is invoked on.
pub trait StatusVisitor {
	/// Value produced by each handler.
	type Output;

	/// Handles [`Status::NoMatch`].
	fn visit_no_match(&mut self) -> Self::Output;

	/// Handles [`Status::Wrapped`].
	fn visit_wrapped(&mut self) -> Self::Output;

	/// Handles [`Status::ReadOnly`].
	fn visit_read_only(&mut self) -> Self::Output;
}

impl Status {
	/// Whether this status represents a failed operation.
	pub const fn is_error(self) -> bool {
		match self {
			Self::NoMatch | Self::ReadOnly => true,
			Self::Wrapped => false,
		}
	}

	/// Dispatches to the visitor method bound to this variant.
	pub fn accept<V: StatusVisitor + ?Sized>(self, visitor: &mut V) -> V::Output {
		match self {
			Self::NoMatch => visitor.visit_no_match(),
			Self::Wrapped => visitor.visit_wrapped(),
			Self::ReadOnly => visitor.visit_read_only(),
		}
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::NoMatch => "String not found",
			Self::Wrapped => "Wrapped search",
			Self::ReadOnly => "Target is read-only",
		})
	}
}
