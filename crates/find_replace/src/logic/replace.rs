use finch_primitives::{CharLen, TextRange};

use super::{FindReplaceLogic, Located, Origin, borrow_target};
use crate::error::Result;
use crate::options::SearchOption;
use crate::pattern::Haystack;
use crate::status::Status;

impl FindReplaceLogic {
	/// Replaces the current match, or the next one when the selection is not
	/// itself a match.
	///
	/// Locating follows [`Self::find_next`], including wrap. After the edit
	/// the selection collapses past the inserted text in the search direction.
	/// Returns `ReadOnly` without modifying anything if the target refuses.
	pub fn replace(&mut self, query: &str, replacement: &str) -> Result<Option<Status>> {
		self.options.set_find_string(query);
		let shared = self.shared_target()?;
		if query.is_empty() {
			return Ok(self.finish("replace", query, Some(Status::NoMatch)));
		}
		let pattern = self.pattern(query)?;
		let mut target = borrow_target(&shared)?;
		let haystack = Haystack::snapshot(&*target);
		let len = haystack.len_chars();
		let selection = target.selection().clamp(len);
		let forward = self.is_active(SearchOption::Forward);

		let Some(scope) = self.find_scope(selection, len) else {
			return Ok(self.finish("replace", query, Some(Status::NoMatch)));
		};
		let origin = self.first_in_scope(scope, selection, Origin::Selection);
		let located = if !selection.is_empty()
			&& scope.encloses(&selection)
			&& pattern.matches_exactly(&haystack, selection)
		{
			Located::Found(selection)
		} else {
			self.locate(&pattern, &haystack, scope, selection, forward, origin)
		};
		let Some((range, status)) = located.into_parts() else {
			return Ok(self.finish("replace", query, Some(Status::NoMatch)));
		};

		target.set_selection(range);
		if !target.is_editable() || !target.can_perform_replace() {
			return Ok(self.finish("replace", query, Some(Status::ReadOnly)));
		}
		let text = pattern.replacement_for(&haystack, range, replacement);
		if let Err(err) = target.replace(range, &text) {
			tracing::debug!(error = %err, "replace rejected by target");
			return Ok(self.finish("replace", query, Some(Status::ReadOnly)));
		}

		let inserted = text.chars().count();
		let caret = if forward {
			range.offset + inserted
		} else {
			range.offset
		};
		target.set_selection(TextRange::point(caret));
		self.shift_scope(range, inserted);
		self.incremental.reset();
		Ok(self.finish("replace", query, status))
	}

	/// Replaces the current match and moves on to the next one.
	///
	/// Returns the status of the find, or of the replace when that failed.
	pub fn replace_and_find(&mut self, query: &str, replacement: &str) -> Result<Option<Status>> {
		let replaced = self.replace(query, replacement)?;
		if replaced.is_some_and(Status::is_error) {
			return Ok(replaced);
		}
		let found = self.find_next(query)?;
		self.status = found.or(replaced);
		Ok(self.status)
	}

	/// Replaces every match in the replace-all scope.
	///
	/// Matches are collected from a snapshot first, so inserted text is never
	/// matched again and the scan always terminates. Wrap does not apply. The
	/// target's editability is checked once, up front; a later rejection stops
	/// the scan with `ReadOnly` and keeps the replacements made so far.
	pub fn replace_all(&mut self, query: &str, replacement: &str) -> Result<(usize, Option<Status>)> {
		self.options.set_find_string(query);
		let shared = self.shared_target()?;
		if query.is_empty() {
			return Ok((0, self.finish("replace_all", query, Some(Status::NoMatch))));
		}
		let pattern = self.pattern(query)?;
		let mut target = borrow_target(&shared)?;
		if !target.is_editable() || !target.can_perform_replace() {
			return Ok((0, self.finish("replace_all", query, Some(Status::ReadOnly))));
		}
		let haystack = Haystack::snapshot(&*target);
		let Some(scope) = self.exhaustive_scope(target.selection(), haystack.len_chars()) else {
			return Ok((0, self.finish("replace_all", query, Some(Status::NoMatch))));
		};

		let mut count = 0;
		let mut delta: isize = 0;
		let mut last = None;
		let mut status = None;
		for m in pattern.find_all(&haystack, scope) {
			let text = pattern.replacement_for(&haystack, m, replacement);
			let at = TextRange::new(m.offset.saturating_add_signed(delta), m.len);
			if let Err(err) = target.replace(at, &text) {
				tracing::debug!(error = %err, count, "replace-all stopped by target");
				status = Some(Status::ReadOnly);
				break;
			}
			let inserted = text.chars().count();
			delta += inserted as isize - m.len as isize;
			last = Some(TextRange::new(at.offset, inserted));
			count += 1;
		}

		if let Some(last) = last {
			let selection = if self.is_active(SearchOption::ReplaceAllScope) {
				scope.resized(delta)
			} else {
				last
			};
			target.set_selection(selection);
		} else if status.is_none() {
			status = Some(Status::NoMatch);
		}
		if self.scope == Some(scope) {
			self.scope = Some(scope.resized(delta));
		}
		self.incremental.reset();
		tracing::debug!(count, "replace-all finished");
		Ok((count, self.finish("replace_all", query, status)))
	}

	/// Selects every match in the replace-all scope without modifying text.
	///
	/// Returns the number of matches; zero also records `NoMatch` as the
	/// engine status.
	pub fn select_all(&mut self, query: &str) -> Result<usize> {
		self.options.set_find_string(query);
		let shared = self.shared_target()?;
		if query.is_empty() {
			self.finish("select_all", query, Some(Status::NoMatch));
			return Ok(0);
		}
		let pattern = self.pattern(query)?;
		let mut target = borrow_target(&shared)?;
		let haystack = Haystack::snapshot(&*target);
		let matches = match self.exhaustive_scope(target.selection(), haystack.len_chars()) {
			Some(scope) => pattern.find_all(&haystack, scope),
			None => Vec::new(),
		};
		if matches.is_empty() {
			self.finish("select_all", query, Some(Status::NoMatch));
			return Ok(0);
		}
		target.set_selections(&matches);
		self.incremental.reset();
		self.finish("select_all", query, None);
		Ok(matches.len())
	}

	/// The region replace-all and select-all scan: the current selection when
	/// `REPLACE_ALL_SCOPE` is on, otherwise the whole document.
	fn exhaustive_scope(&self, selection: TextRange, len: CharLen) -> Option<TextRange> {
		if !self.is_active(SearchOption::ReplaceAllScope) {
			return Some(TextRange::new(0, len));
		}
		let scope = selection.clamp(len);
		(!scope.is_empty()).then_some(scope)
	}
}
