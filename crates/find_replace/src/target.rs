//! The text a find/replace engine operates on.

use std::cell::RefCell;
use std::rc::Rc;

use finch_primitives::{CharLen, TextRange};
use ropey::Rope;
use thiserror::Error;

/// A target refused to apply an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target rejected edit at {}..{}", .range.offset, .range.end())]
pub struct EditRejected {
	/// The range that was to be replaced.
	pub range: TextRange,
}

/// Capability interface over a searchable, replaceable text buffer.
///
/// All offsets and lengths are in characters.
pub trait FindReplaceTarget {
	/// Returns the current selection.
	fn selection(&self) -> TextRange;

	/// Replaces the selection with `range`.
	fn set_selection(&mut self, range: TextRange);

	/// Selects several ranges at once.
	///
	/// Targets without multi-selection select the span from the first range
	/// to the last.
	fn set_selections(&mut self, ranges: &[TextRange]) {
		if let (Some(first), Some(last)) = (ranges.first(), ranges.last()) {
			self.set_selection(first.cover(last));
		}
	}

	/// Total length of the text.
	fn len_chars(&self) -> CharLen;

	/// Returns the text covered by `range`.
	fn text(&self, range: TextRange) -> String;

	/// Replaces the text covered by `range` with `text`.
	fn replace(&mut self, range: TextRange, text: &str) -> Result<(), EditRejected>;

	/// Whether the text may be modified at all.
	fn is_editable(&self) -> bool;

	/// Whether a replace may be attempted right now.
	fn can_perform_replace(&self) -> bool {
		self.is_editable()
	}
}

/// Shared, non-owning handle through which an engine reaches its target.
///
/// The caller keeps its own clone and controls the target's lifetime.
pub type SharedTarget = Rc<RefCell<dyn FindReplaceTarget>>;

/// In-memory target backed by a rope.
#[derive(Debug, Clone, Default)]
pub struct RopeTarget {
	text: Rope,
	selection: TextRange,
	selections: Vec<TextRange>,
	editable: bool,
}

impl RopeTarget {
	/// Creates an editable target with a caret at the start.
	pub fn new(text: &str) -> Self {
		Self {
			text: Rope::from(text),
			selection: TextRange::default(),
			selections: Vec::new(),
			editable: true,
		}
	}

	/// Creates a target that rejects every edit.
	pub fn read_only(text: &str) -> Self {
		Self {
			editable: false,
			..Self::new(text)
		}
	}

	/// Wraps the target for sharing with an engine.
	pub fn shared(self) -> Rc<RefCell<Self>> {
		Rc::new(RefCell::new(self))
	}

	/// Sets whether edits are accepted.
	pub fn set_editable(&mut self, editable: bool) {
		self.editable = editable;
	}

	/// The underlying rope.
	pub fn rope(&self) -> &Rope {
		&self.text
	}

	/// Returns the full content as a string.
	pub fn content(&self) -> String {
		self.text.to_string()
	}

	/// Every range of the last multi-selection, or just the primary selection.
	pub fn selections(&self) -> &[TextRange] {
		if self.selections.is_empty() {
			std::slice::from_ref(&self.selection)
		} else {
			&self.selections
		}
	}
}

impl FindReplaceTarget for RopeTarget {
	fn selection(&self) -> TextRange {
		self.selection
	}

	fn set_selection(&mut self, range: TextRange) {
		self.selection = range.clamp(self.text.len_chars());
		self.selections.clear();
	}

	fn set_selections(&mut self, ranges: &[TextRange]) {
		let len = self.text.len_chars();
		self.selections = ranges.iter().map(|r| r.clamp(len)).collect();
		self.selection = self.selections.first().copied().unwrap_or_default();
	}

	fn len_chars(&self) -> CharLen {
		self.text.len_chars()
	}

	fn text(&self, range: TextRange) -> String {
		let range = range.clamp(self.text.len_chars());
		self.text.slice(range.offset..range.end()).to_string()
	}

	fn replace(&mut self, range: TextRange, text: &str) -> Result<(), EditRejected> {
		let len = self.text.len_chars();
		if !self.editable || range.end() > len {
			return Err(EditRejected { range });
		}
		self.text.remove(range.offset..range.end());
		self.text.insert(range.offset, text);
		self.selections.clear();
		Ok(())
	}

	fn is_editable(&self) -> bool {
		self.editable
	}
}
