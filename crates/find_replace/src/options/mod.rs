//! Search options and the constraints between them.
//!
//! Options carry two kinds of state. The *active* value is what the engine
//! uses; it changes only through [`SearchOptions::set_active`]. The *derived
//! enablement* from [`SearchOptions::can_enable`] depends on the other options
//! and on the current query string, and is recomputed on every query change
//! without touching the active values.
//!
//! `WHOLE_WORD` and `REGEX` exclude each other. Activating `REGEX` forces
//! `WHOLE_WORD` inactive but keeps the user's last explicit whole-word value
//! in a shadow slot; deactivating `REGEX` restores it from there. Whether a
//! restored whole-word applies to the current query is left to
//! [`SearchOptions::is_whole_word_effective`].

use finch_primitives::is_word;

/// A single toggleable search option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchOption {
	/// Search towards the end of the document.
	Forward,
	/// Search the whole document instead of the selection scope.
	Global,
	/// Match letter case exactly.
	CaseSensitive,
	/// Continue from the opposite scope boundary after running off the end.
	Wrap,
	/// Only match whole words.
	WholeWord,
	/// Treat the query as a regular expression.
	Regex,
	/// Search while the query is being typed.
	Incremental,
	/// Restrict replace-all and select-all to the current selection.
	ReplaceAllScope,
}

bitflags::bitflags! {
	/// A set of search options.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SearchOptionSet: u8 {
		/// Search towards the end of the document.
		const FORWARD = 1 << 0;
		/// Search the whole document.
		const GLOBAL = 1 << 1;
		/// Match letter case exactly.
		const CASE_SENSITIVE = 1 << 2;
		/// Wrap at the scope boundary.
		const WRAP = 1 << 3;
		/// Only match whole words.
		const WHOLE_WORD = 1 << 4;
		/// Regular expression query.
		const REGEX = 1 << 5;
		/// Search while typing.
		const INCREMENTAL = 1 << 6;
		/// Replace-all within the selection.
		const REPLACE_ALL_SCOPE = 1 << 7;
	}
}

impl SearchOption {
	/// Every option, in declaration order.
	pub const ALL: [SearchOption; 8] = [
		Self::Forward,
		Self::Global,
		Self::CaseSensitive,
		Self::Wrap,
		Self::WholeWord,
		Self::Regex,
		Self::Incremental,
		Self::ReplaceAllScope,
	];

	/// Returns the bitflag for this option.
	pub const fn as_set(self) -> SearchOptionSet {
		match self {
			Self::Forward => SearchOptionSet::FORWARD,
			Self::Global => SearchOptionSet::GLOBAL,
			Self::CaseSensitive => SearchOptionSet::CASE_SENSITIVE,
			Self::Wrap => SearchOptionSet::WRAP,
			Self::WholeWord => SearchOptionSet::WHOLE_WORD,
			Self::Regex => SearchOptionSet::REGEX,
			Self::Incremental => SearchOptionSet::INCREMENTAL,
			Self::ReplaceAllScope => SearchOptionSet::REPLACE_ALL_SCOPE,
		}
	}
}

/// Option state of one engine instance.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
	active: SearchOptionSet,
	/// Last explicit whole-word value, kept while `REGEX` suppresses it.
	whole_word_intent: bool,
	find_string: String,
}

impl SearchOptions {
	/// Creates options with `initial` applied through the constraint rules.
	pub fn new(initial: SearchOptionSet) -> Self {
		let mut options = Self::default();
		for option in SearchOption::ALL {
			options.set_active(option, initial.contains(option.as_set()));
		}
		options
	}

	/// Returns whether `option` is currently active.
	pub fn is_active(&self, option: SearchOption) -> bool {
		self.active.contains(option.as_set())
	}

	/// Returns a snapshot of all active options.
	pub fn active_set(&self) -> SearchOptionSet {
		self.active
	}

	/// Records an explicit value for `option` and resolves constraints.
	pub fn set_active(&mut self, option: SearchOption, value: bool) {
		match option {
			SearchOption::WholeWord => {
				self.whole_word_intent = value;
				let suppressed = value && self.is_active(SearchOption::Regex);
				self.active.set(SearchOptionSet::WHOLE_WORD, value && !suppressed);
			}
			SearchOption::Regex => {
				self.active.set(SearchOptionSet::REGEX, value);
				let whole_word = !value && self.whole_word_intent;
				self.active.set(SearchOptionSet::WHOLE_WORD, whole_word);
			}
			_ => self.active.set(option.as_set(), value),
		}
	}

	/// Returns whether `option` can currently take effect.
	///
	/// `WHOLE_WORD` needs a single-word query and an inactive `REGEX`;
	/// `INCREMENTAL` needs an inactive `REGEX`. Everything else is always
	/// available.
	pub fn can_enable(&self, option: SearchOption) -> bool {
		match option {
			SearchOption::WholeWord => !self.is_active(SearchOption::Regex) && is_word(&self.find_string),
			SearchOption::Incremental => !self.is_active(SearchOption::Regex),
			_ => true,
		}
	}

	/// The user's last explicit whole-word value, regardless of suppression.
	///
	/// A UI renders the whole-word toggle as checked from this value and as
	/// enabled from [`Self::can_enable`].
	pub fn whole_word_intent(&self) -> bool {
		self.whole_word_intent
	}

	/// The query string used for derived enablement.
	pub fn find_string(&self) -> &str {
		&self.find_string
	}

	/// Updates the query string used for derived enablement.
	pub fn set_find_string(&mut self, query: &str) {
		if self.find_string != query {
			self.find_string.clear();
			self.find_string.push_str(query);
		}
	}

	/// Whether whole-word matching applies to the current query.
	pub fn is_whole_word_effective(&self) -> bool {
		self.is_active(SearchOption::WholeWord) && self.can_enable(SearchOption::WholeWord)
	}

	/// Whether incremental search applies.
	pub fn is_incremental_effective(&self) -> bool {
		self.is_active(SearchOption::Incremental) && self.can_enable(SearchOption::Incremental)
	}
}
