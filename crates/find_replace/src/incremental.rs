//! Anchor tracking for search-as-you-type.
//!
//! While incremental search is on, every query edit searches again from the
//! same anchor: the selection at the time incremental mode was entered, or at
//! the last committed find. Searching from the latest match instead would let
//! the match walk forward as the query grows.

use finch_primitives::{CharIdx, TextRange};

/// Fixed starting point for incremental searches.
#[derive(Debug, Clone, Default)]
pub struct IncrementalSearch {
	anchor: Option<TextRange>,
}

impl IncrementalSearch {
	/// The current anchor, if an incremental cycle is in progress.
	pub fn anchor(&self) -> Option<TextRange> {
		self.anchor
	}

	/// Starts a new cycle anchored at `selection`.
	pub fn begin(&mut self, selection: TextRange) {
		tracing::trace!(offset = selection.offset, len = selection.len, "incremental anchor set");
		self.anchor = Some(selection);
	}

	/// Returns the anchor, starting a cycle at `selection` if none is active.
	pub fn anchor_or_begin(&mut self, selection: TextRange) -> TextRange {
		match self.anchor {
			Some(anchor) => anchor,
			None => {
				self.begin(selection);
				selection
			}
		}
	}

	/// Ends the current cycle. The next query edit anchors afresh.
	pub fn reset(&mut self) {
		if self.anchor.take().is_some() {
			tracing::trace!("incremental anchor cleared");
		}
	}

	/// Where a search from `anchor` starts in the given direction.
	///
	/// Forward searches start at the anchor's start so a longer query can
	/// still match there; backward searches start at its end.
	pub fn start_position(anchor: TextRange, forward: bool) -> CharIdx {
		if forward { anchor.offset } else { anchor.end() }
	}
}
