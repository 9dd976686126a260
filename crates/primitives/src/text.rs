use crate::range::CharIdx;

/// Returns whether a character is a word character (alphanumeric or underscore).
#[inline]
pub fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

/// Returns whether `s` is a single word: non-empty and made only of word characters.
///
/// Whole-word search is only meaningful for such strings.
pub fn is_word(s: &str) -> bool {
	!s.is_empty() && s.chars().all(is_word_char)
}

/// Incremental byte/char offset conversion over a fixed string.
///
/// Regex engines report byte offsets while targets speak characters; this
/// keeps a sorted table of char starts so each conversion is a binary search.
#[derive(Debug, Clone)]
pub struct CharOffsets {
	starts: Vec<usize>,
	byte_len: usize,
}

impl CharOffsets {
	/// Indexes the character starts of `s`.
	pub fn new(s: &str) -> Self {
		Self {
			starts: s.char_indices().map(|(i, _)| i).collect(),
			byte_len: s.len(),
		}
	}

	/// Number of characters in the indexed string.
	pub fn len_chars(&self) -> usize {
		self.starts.len()
	}

	/// Converts a character offset to a byte offset, saturating at the end.
	pub fn to_byte(&self, char_idx: CharIdx) -> usize {
		self.starts.get(char_idx).copied().unwrap_or(self.byte_len)
	}

	/// Converts a byte offset on a char boundary to a character offset.
	pub fn to_char(&self, byte_idx: usize) -> CharIdx {
		match self.starts.binary_search(&byte_idx) {
			Ok(i) | Err(i) => i,
		}
	}
}
