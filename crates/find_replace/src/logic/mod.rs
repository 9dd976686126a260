//! The find/replace engine.
//!
//! [`FindReplaceLogic`] owns the option state, a handle to the current target
//! and the incremental-search anchor. Each operation runs to completion on the
//! caller's thread, moves the target's selection (and content, for replace),
//! and returns `Ok(None)` on plain success or `Ok(Some(status))` for the
//! outcomes described by [`Status`]. `Err` is reserved for precondition
//! failures, which are raised before the target is modified.

use std::cell::RefMut;

use finch_primitives::{CharLen, TextRange};

use crate::config::FindReplaceConfig;
use crate::error::{FindReplaceError, Result};
use crate::incremental::IncrementalSearch;
use crate::options::{SearchOption, SearchOptions};
use crate::pattern::{Haystack, Pattern, PatternFlags};
use crate::status::Status;
use crate::target::{FindReplaceTarget, SharedTarget};

mod replace;

/// Where a search starts from.
#[derive(Debug, Clone, Copy)]
enum Origin {
	/// The active edge of the current selection.
	Selection,
	/// A fixed incremental-search anchor.
	Anchor(TextRange),
	/// The boundary of the scope the search runs in.
	ScopeBoundary,
}

/// Outcome of locating a match inside a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Located {
	Found(TextRange),
	Wrapped(TextRange),
	NotFound,
}

impl Located {
	fn into_parts(self) -> Option<(TextRange, Option<Status>)> {
		match self {
			Self::Found(range) => Some((range, None)),
			Self::Wrapped(range) => Some((range, Some(Status::Wrapped))),
			Self::NotFound => None,
		}
	}
}

/// Find/replace engine bound to one search context.
pub struct FindReplaceLogic {
	options: SearchOptions,
	target: Option<SharedTarget>,
	/// Selection-bounded scope used while `GLOBAL` is off.
	scope: Option<TextRange>,
	/// Set while no search has run in the captured scope yet.
	fresh_scope: bool,
	incremental: IncrementalSearch,
	status: Option<Status>,
	cached: Option<(String, PatternFlags, Pattern)>,
}

impl Default for FindReplaceLogic {
	fn default() -> Self {
		Self::new()
	}
}

impl FindReplaceLogic {
	/// Creates an engine with default options and no target.
	pub fn new() -> Self {
		Self::with_config(&FindReplaceConfig::default())
	}

	/// Creates an engine whose options start from `config`.
	pub fn with_config(config: &FindReplaceConfig) -> Self {
		Self {
			options: SearchOptions::new(config.initial_options()),
			target: None,
			scope: None,
			fresh_scope: false,
			incremental: IncrementalSearch::default(),
			status: None,
			cached: None,
		}
	}

	/// The option state.
	pub fn options(&self) -> &SearchOptions {
		&self.options
	}

	/// Whether `option` is active.
	pub fn is_active(&self, option: SearchOption) -> bool {
		self.options.is_active(option)
	}

	/// Whether `option` can currently take effect. See [`SearchOptions::can_enable`].
	pub fn can_enable(&self, option: SearchOption) -> bool {
		self.options.can_enable(option)
	}

	/// Sets an option and applies its side effects on scope and anchor.
	///
	/// Turning `GLOBAL` off captures the current selection as the search
	/// scope; turning it on drops the scope. Turning `INCREMENTAL` on anchors
	/// at the current selection, and anything that makes incremental search
	/// unavailable clears the anchor.
	pub fn set_active(&mut self, option: SearchOption, value: bool) {
		self.options.set_active(option, value);
		tracing::debug!(?option, value, "search option changed");
		match option {
			SearchOption::Global if value => self.set_scope(None),
			SearchOption::Global => self.set_scope(self.current_selection()),
			SearchOption::Incremental | SearchOption::Regex if !self.options.is_incremental_effective() => {
				self.incremental.reset()
			}
			SearchOption::Incremental if value => {
				if let Some(selection) = self.current_selection() {
					self.incremental.begin(selection);
				}
			}
			_ => {}
		}
	}

	/// Records the query being edited so derived enablement follows it.
	///
	/// Call on every keystroke, then re-read [`Self::can_enable`].
	pub fn set_find_string(&mut self, query: &str) {
		self.options.set_find_string(query);
	}

	/// The current target, if one is installed.
	pub fn target(&self) -> Option<&SharedTarget> {
		self.target.as_ref()
	}

	/// Installs a new target.
	///
	/// Resets the incremental anchor and the search scope. With `GLOBAL` off,
	/// the new target's selection becomes the scope.
	pub fn update_target(&mut self, target: SharedTarget) {
		self.target = Some(target);
		self.incremental.reset();
		self.status = None;
		let scope = if self.is_active(SearchOption::Global) {
			None
		} else {
			self.current_selection()
		};
		self.set_scope(scope);
		tracing::debug!(scope = ?self.scope, "find/replace target updated");
	}

	/// Status of the most recent operation.
	pub fn status(&self) -> Option<Status> {
		self.status
	}

	/// The selection-bounded scope, when one has been captured.
	pub fn scope(&self) -> Option<TextRange> {
		self.scope
	}

	/// The incremental-search anchor, while a cycle is in progress.
	pub fn incremental_anchor(&self) -> Option<TextRange> {
		self.incremental.anchor()
	}

	/// Compiles `query` under the current options without searching.
	pub fn validate(&mut self, query: &str) -> Result<()> {
		self.options.set_find_string(query);
		if query.is_empty() {
			return Ok(());
		}
		self.pattern(query).map(|_| ())
	}

	/// Finds the next occurrence in the direction of `FORWARD`.
	pub fn find_next(&mut self, query: &str) -> Result<Option<Status>> {
		let forward = self.is_active(SearchOption::Forward);
		let status = self.find_and_select("find_next", query, forward, Origin::Selection)?;
		self.incremental.reset();
		Ok(status)
	}

	/// Finds the next occurrence against the direction of `FORWARD`.
	///
	/// The direction is read at call time and the option itself is left
	/// untouched, so this is a one-shot reversal.
	pub fn find_previous(&mut self, query: &str) -> Result<Option<Status>> {
		let forward = !self.is_active(SearchOption::Forward);
		let status = self.find_and_select("find_previous", query, forward, Origin::Selection)?;
		self.incremental.reset();
		Ok(status)
	}

	/// Searches from the incremental anchor after a query edit.
	///
	/// Does nothing unless incremental search is active and available. An
	/// empty query puts the selection back on the anchor.
	pub fn incremental_search(&mut self, query: &str) -> Result<Option<Status>> {
		self.options.set_find_string(query);
		if !self.options.is_incremental_effective() {
			return Ok(None);
		}
		let shared = self.shared_target()?;
		let mut target = borrow_target(&shared)?;
		let anchor = self.incremental.anchor_or_begin(target.selection());
		if query.is_empty() {
			target.set_selection(anchor);
			return Ok(self.finish("incremental", query, None));
		}
		drop(target);
		let forward = self.is_active(SearchOption::Forward);
		self.find_and_select("incremental", query, forward, Origin::Anchor(anchor))
	}

	fn find_and_select(
		&mut self,
		op: &'static str,
		query: &str,
		forward: bool,
		origin: Origin,
	) -> Result<Option<Status>> {
		self.options.set_find_string(query);
		let shared = self.shared_target()?;
		if query.is_empty() {
			return Ok(self.finish(op, query, Some(Status::NoMatch)));
		}
		let pattern = self.pattern(query)?;
		let mut target = borrow_target(&shared)?;
		let haystack = Haystack::snapshot(&*target);
		let selection = target.selection().clamp(haystack.len_chars());

		let located = match self.find_scope(selection, haystack.len_chars()) {
			Some(scope) => {
				let origin = self.first_in_scope(scope, selection, origin);
				self.locate(&pattern, &haystack, scope, selection, forward, origin)
			}
			None => Located::NotFound,
		};
		let status = match located.into_parts() {
			Some((range, status)) => {
				target.set_selection(range);
				status
			}
			None => Some(Status::NoMatch),
		};
		Ok(self.finish(op, query, status))
	}

	/// Looks for a match from `origin`, retrying from the opposite scope
	/// boundary when `WRAP` is on.
	fn locate(
		&self,
		pattern: &Pattern,
		haystack: &Haystack,
		scope: TextRange,
		selection: TextRange,
		forward: bool,
		origin: Origin,
	) -> Located {
		let wrap = self.is_active(SearchOption::Wrap);
		let (pos, skip) = match origin {
			Origin::Selection if forward => (selection.end(), Some(selection).filter(TextRange::is_empty)),
			Origin::Selection => (selection.offset, None),
			Origin::Anchor(anchor) => (IncrementalSearch::start_position(anchor, forward), None),
			Origin::ScopeBoundary if forward => (scope.offset, None),
			Origin::ScopeBoundary => (scope.end(), None),
		};

		if forward {
			if let Some(range) = pattern.find_forward(haystack, pos, scope, skip) {
				return Located::Found(range);
			}
			if wrap && let Some(range) = pattern.find_forward(haystack, scope.offset, scope, skip) {
				return Located::Wrapped(range);
			}
		} else {
			if let Some(range) = pattern.find_backward(haystack, pos, scope) {
				return Located::Found(range);
			}
			if wrap && let Some(range) = pattern.find_backward(haystack, scope.end(), scope) {
				return Located::Wrapped(range);
			}
		}
		Located::NotFound
	}

	/// The region a find may match in, or `None` when a scoped search has
	/// nothing to search.
	fn find_scope(&mut self, selection: TextRange, len: CharLen) -> Option<TextRange> {
		if self.is_active(SearchOption::Global) {
			return Some(TextRange::new(0, len));
		}
		if self.scope.is_none() {
			self.set_scope(Some(selection));
		}
		let scope = self.scope?.clamp(len);
		(!scope.is_empty()).then_some(scope)
	}

	fn set_scope(&mut self, scope: Option<TextRange>) {
		self.scope = scope;
		self.fresh_scope = scope.is_some();
	}

	/// Starts the first search in a newly captured scope at its boundary
	/// while the whole scope is still selected.
	fn first_in_scope(&mut self, scope: TextRange, selection: TextRange, origin: Origin) -> Origin {
		let fresh = std::mem::take(&mut self.fresh_scope);
		match origin {
			Origin::Selection if fresh && selection == scope => Origin::ScopeBoundary,
			origin => origin,
		}
	}

	/// Grows or shrinks the captured scope after `range` became `inserted` chars long.
	fn shift_scope(&mut self, range: TextRange, inserted: CharLen) {
		if let Some(scope) = self.scope
			&& scope.encloses(&range)
		{
			self.scope = Some(scope.resized(inserted as isize - range.len as isize));
		}
	}

	fn pattern_flags(&self) -> PatternFlags {
		PatternFlags {
			case_sensitive: self.is_active(SearchOption::CaseSensitive),
			whole_word: self.options.is_whole_word_effective(),
			regex: self.is_active(SearchOption::Regex),
		}
	}

	/// Compiles `query`, reusing the last pattern when nothing changed.
	fn pattern(&mut self, query: &str) -> Result<Pattern> {
		let flags = self.pattern_flags();
		if let Some((cached_query, cached_flags, pattern)) = &self.cached
			&& cached_query == query
			&& *cached_flags == flags
		{
			return Ok(pattern.clone());
		}
		let pattern = Pattern::compile(query, flags).inspect_err(|e| {
			tracing::debug!(query, error = %e, "search pattern rejected");
		})?;
		self.cached = Some((query.to_string(), flags, pattern.clone()));
		Ok(pattern)
	}

	fn shared_target(&self) -> Result<SharedTarget> {
		self.target.clone().ok_or(FindReplaceError::NoTarget)
	}

	fn current_selection(&self) -> Option<TextRange> {
		let target = self.target.as_ref()?.try_borrow().ok()?;
		Some(target.selection())
	}

	fn finish(&mut self, op: &'static str, query: &str, status: Option<Status>) -> Option<Status> {
		tracing::debug!(op, query, ?status, "find/replace operation finished");
		self.status = status;
		status
	}
}

fn borrow_target(target: &SharedTarget) -> Result<RefMut<'_, dyn FindReplaceTarget + 'static>> {
	target
		.try_borrow_mut()
		.map_err(|_| FindReplaceError::TargetBusy)
}

#[cfg(test)]
mod tests;
