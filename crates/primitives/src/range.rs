/// A position in the text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in the text, measured in characters (not bytes).
///
/// Distinct from [`CharIdx`] to avoid passing an index where a length is
/// expected or vice versa.
pub type CharLen = usize;

/// A contiguous span of text given as a start offset and a length.
///
/// This is the selection shape exchanged with find/replace targets: a
/// zero-length range is a caret, anything else covers `offset..offset + len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
	/// First character covered by the range.
	pub offset: CharIdx,
	/// Number of characters covered.
	pub len: CharLen,
}

impl TextRange {
	/// Creates a range from a start offset and a length.
	pub const fn new(offset: CharIdx, len: CharLen) -> Self {
		Self { offset, len }
	}

	/// Creates a zero-length range (caret) at `pos`.
	pub const fn point(pos: CharIdx) -> Self {
		Self::new(pos, 0)
	}

	/// Creates a range covering `start..end`. Reversed bounds are swapped.
	pub fn between(start: CharIdx, end: CharIdx) -> Self {
		let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
		Self::new(lo, hi - lo)
	}

	/// Returns the exclusive end offset.
	#[inline]
	pub const fn end(&self) -> CharIdx {
		self.offset + self.len
	}

	/// Returns true if the range covers no characters.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns true if `other` lies entirely within this range.
	pub fn encloses(&self, other: &TextRange) -> bool {
		other.offset >= self.offset && other.end() <= self.end()
	}

	/// Clamps `pos` into `offset..=end`.
	pub fn clamp_pos(&self, pos: CharIdx) -> CharIdx {
		pos.clamp(self.offset, self.end())
	}

	/// Clamps both bounds to `[0, max_char]`.
	pub fn clamp(&self, max_char: CharIdx) -> Self {
		Self::between(self.offset.min(max_char), self.end().min(max_char))
	}

	/// Returns the smallest range covering both `self` and `other`.
	pub fn cover(&self, other: &TextRange) -> Self {
		Self::between(self.offset.min(other.offset), self.end().max(other.end()))
	}

	/// Returns this range with its length adjusted by `delta` characters,
	/// saturating at zero.
	pub fn resized(&self, delta: isize) -> Self {
		Self::new(self.offset, self.len.saturating_add_signed(delta))
	}
}
