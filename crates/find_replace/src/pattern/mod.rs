//! Query compilation and bounded matching.
//!
//! Literal queries are escaped and compiled like regex queries so both share
//! one matcher. Whole-word matching wraps the pattern in word-boundary
//! assertions instead of filtering matches afterwards. All positions in and
//! out of this module are character offsets; byte offsets stay internal.

use finch_primitives::{CharIdx, CharOffsets, TextRange};
use regex::{Regex, RegexBuilder};

use crate::target::FindReplaceTarget;

/// Compilation flags for a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatternFlags {
	/// Match letter case exactly.
	pub case_sensitive: bool,
	/// Require word boundaries on both ends of a match.
	pub whole_word: bool,
	/// Interpret the query as a regular expression.
	pub regex: bool,
}

/// A snapshot of a target's text prepared for matching.
#[derive(Debug, Clone)]
pub struct Haystack {
	text: String,
	offsets: CharOffsets,
}

impl Haystack {
	/// Wraps `text` for matching.
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let offsets = CharOffsets::new(&text);
		Self { text, offsets }
	}

	/// Captures the full text of `target`.
	pub fn snapshot(target: &dyn FindReplaceTarget) -> Self {
		Self::new(target.text(TextRange::new(0, target.len_chars())))
	}

	/// Length in characters.
	pub fn len_chars(&self) -> usize {
		self.offsets.len_chars()
	}

	fn byte_span(&self, range: TextRange) -> (usize, usize) {
		(self.offsets.to_byte(range.offset), self.offsets.to_byte(range.end()))
	}

	fn char_range(&self, m: regex::Match<'_>) -> TextRange {
		TextRange::between(self.offsets.to_char(m.start()), self.offsets.to_char(m.end()))
	}

	/// Byte offset of the char boundary following `byte`, or `None` at the end.
	fn next_boundary(&self, byte: usize) -> Option<usize> {
		let c = self.text[byte..].chars().next()?;
		Some(byte + c.len_utf8())
	}
}

/// A compiled find query.
#[derive(Debug, Clone)]
pub struct Pattern {
	regex: Regex,
	flags: PatternFlags,
}

impl Pattern {
	/// Compiles `query` under `flags`.
	///
	/// Fails only for invalid regex queries; literal queries always compile.
	pub fn compile(query: &str, flags: PatternFlags) -> Result<Self, regex::Error> {
		let body = if flags.regex {
			query.to_string()
		} else {
			regex::escape(query)
		};
		let source = if flags.whole_word {
			format!(r"\b(?:{body})\b")
		} else {
			body
		};
		let regex = RegexBuilder::new(&source)
			.case_insensitive(!flags.case_sensitive)
			.multi_line(true)
			.build()?;
		Ok(Self { regex, flags })
	}

	/// Finds the first match starting at or after `from` that lies within `scope`.
	///
	/// An empty match equal to `skip` is passed over so that repeated searches
	/// from a caret make progress.
	pub fn find_forward(
		&self,
		haystack: &Haystack,
		from: CharIdx,
		scope: TextRange,
		skip: Option<TextRange>,
	) -> Option<TextRange> {
		let (_, end) = haystack.byte_span(scope);
		let mut at = haystack.offsets.to_byte(scope.clamp_pos(from));
		loop {
			let m = self.regex.find_at(&haystack.text, at)?;
			if m.start() > end {
				return None;
			}
			let range = haystack.char_range(m);
			let skipped = range.is_empty() && Some(range) == skip;
			if m.end() <= end && !skipped {
				return Some(range);
			}
			at = haystack.next_boundary(m.start())?;
		}
	}

	/// Finds the last match starting strictly before `before` that lies within `scope`.
	pub fn find_backward(&self, haystack: &Haystack, before: CharIdx, scope: TextRange) -> Option<TextRange> {
		let (start, end) = haystack.byte_span(scope);
		let limit = haystack.offsets.to_byte(scope.clamp_pos(before));
		let mut at = start;
		let mut last = None;
		while at < limit {
			let Some(m) = self.regex.find_at(&haystack.text, at) else {
				break;
			};
			if m.start() >= limit {
				break;
			}
			if m.end() <= end {
				last = Some(haystack.char_range(m));
			}
			match haystack.next_boundary(m.start()) {
				Some(next) => at = next,
				None => break,
			}
		}
		last
	}

	/// Finds every non-overlapping match within `scope`, left to right.
	///
	/// Empty matches count, except one directly after the end of the previous
	/// match; the scan steps one character past each of them.
	pub fn find_all(&self, haystack: &Haystack, scope: TextRange) -> Vec<TextRange> {
		let (start, end) = haystack.byte_span(scope);
		let mut matches = Vec::new();
		let mut at = start;
		let mut last_end = None;
		while at <= end {
			let Some(m) = self.regex.find_at(&haystack.text, at) else {
				break;
			};
			if m.start() > end {
				break;
			}
			let keep = m.end() <= end && !(m.is_empty() && last_end == Some(m.start()));
			if keep {
				matches.push(haystack.char_range(m));
				last_end = Some(m.end());
			}
			if keep && !m.is_empty() {
				at = m.end();
			} else {
				match haystack.next_boundary(m.start()) {
					Some(next) => at = next,
					None => break,
				}
			}
		}
		matches
	}

	/// Whether the text covered by `range` is itself a match.
	pub fn matches_exactly(&self, haystack: &Haystack, range: TextRange) -> bool {
		let (start, end) = haystack.byte_span(range);
		self.regex
			.find_at(&haystack.text, start)
			.is_some_and(|m| m.start() == start && m.end() == end)
	}

	/// Produces the text that replaces the match at `range`.
	///
	/// Regex patterns expand `$1`/`${name}` references against the match;
	/// literal patterns insert `replacement` verbatim.
	pub fn replacement_for(&self, haystack: &Haystack, range: TextRange, replacement: &str) -> String {
		if !self.flags.regex {
			return replacement.to_string();
		}
		let (start, end) = haystack.byte_span(range);
		match self.regex.captures_at(&haystack.text, start) {
			Some(caps) if caps.get(0).is_some_and(|m| m.start() == start && m.end() == end) => {
				let mut out = String::new();
				caps.expand(replacement, &mut out);
				out
			}
			_ => replacement.to_string(),
		}
	}
}
